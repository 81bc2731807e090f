use async_trait::async_trait;

use crate::domain::{ParticipantSlotMap, PlayerIdentity, TimelineFrame};
use crate::errors::HeatmapResult;

/// Source of accounts, match lists and timelines
///
/// Implementations map transport failures onto [`crate::errors::HeatmapError`]:
/// 404 to `NotFound`, 429 to `RateLimited`, anything else to `Provider`.
#[async_trait]
pub trait MatchDataProvider: Send + Sync {
    async fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> HeatmapResult<PlayerIdentity>;

    /// Ranked match ids, most recent first
    async fn ranked_match_ids(&self, puuid: &str, count: usize) -> HeatmapResult<Vec<String>>;

    async fn match_timeline(&self, match_id: &str) -> HeatmapResult<Vec<TimelineFrame>>;

    async fn match_roster(&self, match_id: &str) -> HeatmapResult<ParticipantSlotMap>;
}
