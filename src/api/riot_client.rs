use anyhow::Result;
use async_trait::async_trait;
use log::info;
use urlencoding::encode;

use super::models::{AccountResponse, MatchResponse, TimelineResponse};
use super::provider::MatchDataProvider;
use crate::config::ProviderSettings;
use crate::domain::{ParticipantSlotMap, PlayerIdentity, TimelineFrame};
use crate::errors::HeatmapResult;
use crate::http::RateLimitedClient;

/// Ranked solo/duo queue
const RANKED_QUEUE_TYPE: &str = "ranked";

/// Riot Games API client
pub struct RiotClient {
    client: RateLimitedClient,
    base_url: String,
}

impl RiotClient {
    /// Create a new Riot API client
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            &settings.api_key,
        )?;
        Ok(Self {
            client,
            base_url: settings.api_base_url(),
        })
    }

    // --- Helper Methods ---

    fn build_account_url(&self, game_name: &str, tag_line: &str) -> String {
        format!(
            "{}/riot/account/v1/accounts/by-riot-id/{}/{}",
            self.base_url,
            encode(game_name),
            encode(tag_line)
        )
    }

    fn build_match_ids_url(&self, puuid: &str, count: usize) -> String {
        format!(
            "{}/lol/match/v5/matches/by-puuid/{}/ids?start=0&count={}&type={}",
            self.base_url,
            encode(puuid),
            count,
            RANKED_QUEUE_TYPE
        )
    }

    fn build_timeline_url(&self, match_id: &str) -> String {
        format!("{}/lol/match/v5/matches/{}/timeline", self.base_url, encode(match_id))
    }

    fn build_match_url(&self, match_id: &str) -> String {
        format!("{}/lol/match/v5/matches/{}", self.base_url, encode(match_id))
    }
}

#[async_trait]
impl MatchDataProvider for RiotClient {
    async fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> HeatmapResult<PlayerIdentity> {
        let url = self.build_account_url(game_name, tag_line);
        info!("Resolving account {}#{}", game_name, tag_line);

        let account: AccountResponse = self.client.get_json(&url).await?;
        Ok(account.into_identity(game_name, tag_line))
    }

    async fn ranked_match_ids(&self, puuid: &str, count: usize) -> HeatmapResult<Vec<String>> {
        let url = self.build_match_ids_url(puuid, count);
        self.client.get_json(&url).await
    }

    async fn match_timeline(&self, match_id: &str) -> HeatmapResult<Vec<TimelineFrame>> {
        let url = self.build_timeline_url(match_id);
        info!("Fetching timeline for {}", match_id);

        let timeline: TimelineResponse = self.client.get_json(&url).await?;
        Ok(timeline.into_frames())
    }

    async fn match_roster(&self, match_id: &str) -> HeatmapResult<ParticipantSlotMap> {
        let url = self.build_match_url(match_id);
        let response: MatchResponse = self.client.get_json(&url).await?;
        Ok(response.into_roster())
    }
}
