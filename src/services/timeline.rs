use std::sync::Arc;

use crate::api::MatchDataProvider;
use crate::domain::{MatchReference, PlayerIdentity, Slot, TimelineFrame};
use crate::errors::{HeatmapError, HeatmapResult};
use crate::rate_limiter::{retry_rate_limited, BackoffPolicy};

/// Fetches per-match frames and locates the tracked player's slot
pub struct TimelineFetcher<P> {
    provider: Arc<P>,
    backoff: BackoffPolicy,
}

impl<P> Clone for TimelineFetcher<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            backoff: self.backoff,
        }
    }
}

impl<P: MatchDataProvider> TimelineFetcher<P> {
    pub fn new(provider: Arc<P>, backoff: BackoffPolicy) -> Self {
        Self { provider, backoff }
    }

    /// Frames in ascending timestamp order
    pub async fn fetch_timeline(&self, match_ref: &MatchReference) -> HeatmapResult<Vec<TimelineFrame>> {
        let label = format!("timeline {}", match_ref.match_id);
        let mut frames = retry_rate_limited(&self.backoff, &label, || {
            self.provider.match_timeline(&match_ref.match_id)
        })
        .await
        .map_err(|e| as_match_failure(e, &label))?;

        frames.sort_by_key(|frame| frame.timestamp_ms);
        Ok(frames)
    }

    pub async fn resolve_slot(
        &self,
        match_ref: &MatchReference,
        identity: &PlayerIdentity,
    ) -> HeatmapResult<Slot> {
        let label = format!("roster {}", match_ref.match_id);
        let roster = retry_rate_limited(&self.backoff, &label, || {
            self.provider.match_roster(&match_ref.match_id)
        })
        .await
        .map_err(|e| as_match_failure(e, &label))?;

        roster
            .slot_of(&identity.puuid)
            .ok_or_else(|| HeatmapError::SlotNotFound {
                match_id: match_ref.match_id.clone(),
            })
    }
}

// Everything that goes wrong for a single match is a provider failure for that match.
fn as_match_failure(error: HeatmapError, label: &str) -> HeatmapError {
    match error.exhausted() {
        HeatmapError::NotFound(_) => HeatmapError::provider(format!("{} not found", label)),
        HeatmapError::Provider(message) => HeatmapError::provider(format!("{}: {}", label, message)),
        other => other,
    }
}
