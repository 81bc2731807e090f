use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::provider::MatchDataProvider;
use crate::domain::{ParticipantSlotMap, PlayerIdentity, TimelineFrame};
use crate::errors::{HeatmapError, HeatmapResult};
use crate::services::AbortHandle;

/// In-memory provider for exercising the pipeline without network access
#[derive(Default)]
pub struct MockProvider {
    accounts: HashMap<String, PlayerIdentity>,
    account_error: Option<HeatmapError>,
    match_ids: HashMap<String, Vec<String>>,
    timelines: HashMap<String, HeatmapResult<Vec<TimelineFrame>>>,
    rosters: HashMap<String, ParticipantSlotMap>,
    throttled_calls: Mutex<HashMap<String, usize>>,
    timeline_delay: Option<Duration>,
    match_delays: HashMap<String, Duration>,
    abort_after_roster: Option<(String, AbortHandle)>,
    abort_after_timeline: Option<(String, AbortHandle)>,
    timeline_calls: AtomicUsize,
    completed_timelines: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, game_name: &str, tag_line: &str, puuid: &str) -> Self {
        self.accounts.insert(
            riot_id(game_name, tag_line),
            PlayerIdentity {
                game_name: game_name.to_string(),
                tag_line: tag_line.to_string(),
                puuid: puuid.to_string(),
            },
        );
        self
    }

    pub fn with_account_error(mut self, error: HeatmapError) -> Self {
        self.account_error = Some(error);
        self
    }

    pub fn with_match_ids(mut self, puuid: &str, ids: &[&str]) -> Self {
        self.match_ids
            .insert(puuid.to_string(), ids.iter().map(|id| id.to_string()).collect());
        self
    }

    /// Register a match whose roster puts `puuid` in `slot`
    pub fn with_match(mut self, match_id: &str, slot: u8, puuid: &str, frames: Vec<TimelineFrame>) -> Self {
        let mut roster = ParticipantSlotMap::new();
        for other in 1..=10u8 {
            if other == slot {
                roster.insert(other, puuid);
            } else {
                roster.insert(other, format!("{}-other-{}", match_id, other));
            }
        }
        self.rosters.insert(match_id.to_string(), roster);
        self.timelines.insert(match_id.to_string(), Ok(frames));
        self
    }

    pub fn with_roster(mut self, match_id: &str, roster: ParticipantSlotMap) -> Self {
        self.rosters.insert(match_id.to_string(), roster);
        self
    }

    pub fn with_timeline_error(mut self, match_id: &str, error: HeatmapError) -> Self {
        self.timelines.insert(match_id.to_string(), Err(error));
        self
    }

    /// The first `times` timeline requests for `match_id` answer 429
    pub fn with_throttled_timeline(self, match_id: &str, times: usize) -> Self {
        if let Ok(mut throttled) = self.throttled_calls.lock() {
            throttled.insert(match_id.to_string(), times);
        }
        self
    }

    pub fn with_timeline_delay(mut self, delay: Duration) -> Self {
        self.timeline_delay = Some(delay);
        self
    }

    /// Delay the roster lookup of one match, which holds back the whole match
    pub fn with_match_delay(mut self, match_id: &str, delay: Duration) -> Self {
        self.match_delays.insert(match_id.to_string(), delay);
        self
    }

    pub fn with_abort_after_roster(mut self, match_id: &str, handle: AbortHandle) -> Self {
        self.abort_after_roster = Some((match_id.to_string(), handle));
        self
    }

    pub fn with_abort_after_timeline(mut self, match_id: &str, handle: AbortHandle) -> Self {
        self.abort_after_timeline = Some((match_id.to_string(), handle));
        self
    }

    pub fn timeline_calls(&self) -> usize {
        self.timeline_calls.load(Ordering::SeqCst)
    }

    /// Match ids whose timeline was served, in completion order
    pub fn completed_timelines(&self) -> Vec<String> {
        self.completed_timelines
            .lock()
            .map(|completed| completed.clone())
            .unwrap_or_default()
    }

    fn record_completed(&self, match_id: &str) {
        if let Ok(mut completed) = self.completed_timelines.lock() {
            completed.push(match_id.to_string());
        }
    }

    fn take_throttle(&self, match_id: &str) -> bool {
        let Ok(mut throttled) = self.throttled_calls.lock() else {
            return false;
        };
        match throttled.get_mut(match_id) {
            Some(remaining) if *remaining > 0 => {
                *remaining -= 1;
                true
            }
            _ => false,
        }
    }
}

fn trigger_abort(trigger: &Option<(String, AbortHandle)>, match_id: &str) {
    if let Some((_, handle)) = trigger.as_ref().filter(|(target, _)| target == match_id) {
        handle.abort();
    }
}

fn riot_id(game_name: &str, tag_line: &str) -> String {
    format!("{}#{}", game_name, tag_line)
}

#[async_trait]
impl MatchDataProvider for MockProvider {
    async fn account_by_riot_id(&self, game_name: &str, tag_line: &str) -> HeatmapResult<PlayerIdentity> {
        if let Some(error) = &self.account_error {
            return Err(error.clone());
        }
        self.accounts
            .get(&riot_id(game_name, tag_line))
            .cloned()
            .ok_or_else(|| HeatmapError::NotFound(riot_id(game_name, tag_line)))
    }

    async fn ranked_match_ids(&self, puuid: &str, count: usize) -> HeatmapResult<Vec<String>> {
        let ids = self.match_ids.get(puuid).cloned().unwrap_or_default();
        Ok(ids.into_iter().take(count).collect())
    }

    async fn match_timeline(&self, match_id: &str) -> HeatmapResult<Vec<TimelineFrame>> {
        self.timeline_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.timeline_delay {
            tokio::time::sleep(delay).await;
        }
        if self.take_throttle(match_id) {
            return Err(HeatmapError::RateLimited { retry_after: None });
        }
        let timeline = self
            .timelines
            .get(match_id)
            .cloned()
            .unwrap_or_else(|| Err(HeatmapError::NotFound(match_id.to_string())));
        if timeline.is_ok() {
            self.record_completed(match_id);
        }
        trigger_abort(&self.abort_after_timeline, match_id);
        timeline
    }

    async fn match_roster(&self, match_id: &str) -> HeatmapResult<ParticipantSlotMap> {
        if let Some(delay) = self.match_delays.get(match_id) {
            tokio::time::sleep(*delay).await;
        }
        let roster = self
            .rosters
            .get(match_id)
            .cloned()
            .ok_or_else(|| HeatmapError::NotFound(match_id.to_string()));
        trigger_abort(&self.abort_after_roster, match_id);
        roster
    }
}
