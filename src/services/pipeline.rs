use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use super::abort::AbortSignal;
use super::identity::IdentityResolver;
use super::timeline::TimelineFetcher;
use crate::api::MatchDataProvider;
use crate::config::settings::AppConfig;
use crate::domain::{FetchProgress, MatchReference, PlayerIdentity, PlayerQuery};
use crate::errors::{HeatmapError, HeatmapResult};
use crate::heatmap::{
    extract, GridNormalizer, MatchContribution, PhaseAccumulator, PhaseDatasets, SampleClassifier,
};
use crate::rate_limiter::BackoffPolicy;

type MatchOutcome = HeatmapResult<MatchContribution>;

/// Runs resolve → fetch → extract → normalize → aggregate for one player
pub struct PipelineService<P> {
    provider: Arc<P>,
    config: AppConfig,
}

impl<P: MatchDataProvider + 'static> PipelineService<P> {
    pub fn new(provider: P, config: AppConfig) -> Self {
        Self::with_shared(Arc::new(provider), config)
    }

    pub fn with_shared(provider: Arc<P>, config: AppConfig) -> Self {
        Self { provider, config }
    }

    pub async fn run(&self, game_name: &str, tag_line: &str) -> HeatmapResult<PhaseDatasets> {
        self.run_with_abort(game_name, tag_line, &AbortSignal::never())
            .await
    }

    pub async fn run_with_abort(
        &self,
        game_name: &str,
        tag_line: &str,
        abort: &AbortSignal,
    ) -> HeatmapResult<PhaseDatasets> {
        info!("=== Starting Heatmap Pipeline ===\n");

        // Step 1: Resolve identity and match list
        let query = PlayerQuery::new(game_name, tag_line)?;
        let classifier = self.classifier()?;
        let (identity, matches) = self.resolve_player(&query).await?;
        info!("  → {} matches to process\n", matches.len());

        // Step 2: Fetch and normalize each match
        let outcomes = self
            .collect_outcomes(&identity, &matches, classifier, abort)
            .await;

        // Step 3: Merge into phase datasets
        let datasets = self.reduce(&matches, outcomes)?;

        info!("=== Pipeline Complete ===");
        Ok(datasets)
    }

    async fn resolve_player(
        &self,
        query: &PlayerQuery,
    ) -> HeatmapResult<(PlayerIdentity, Vec<MatchReference>)> {
        info!("Step 1: Resolving {}...", query.riot_id());

        let resolver = IdentityResolver::new(Arc::clone(&self.provider), self.backoff());
        let identity = resolver.resolve(query).await?;
        let matches = resolver
            .recent_ranked_matches(&identity, self.config.pipeline.match_count)
            .await?;

        Ok((identity, matches))
    }

    async fn collect_outcomes(
        &self,
        identity: &PlayerIdentity,
        matches: &[MatchReference],
        classifier: SampleClassifier,
        abort: &AbortSignal,
    ) -> Vec<Option<MatchOutcome>> {
        info!("Step 2: Fetching match timelines...");

        let fetcher = TimelineFetcher::new(Arc::clone(&self.provider), self.backoff());
        let timeout = self.config.pipeline.match_timeout();
        let permits = Arc::new(Semaphore::new(self.config.pipeline.max_concurrent_fetches.max(1)));
        let mut tasks = JoinSet::new();

        for (index, match_ref) in matches.iter().enumerate() {
            let permit = tokio::select! {
                biased;
                _ = abort.raised() => {
                    warn!("Abort requested, {} matches left unfetched", matches.len() - index);
                    break;
                }
                permit = Arc::clone(&permits).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let fetcher = fetcher.clone();
            let identity = identity.clone();
            let match_ref = match_ref.clone();
            let abort = abort.clone();
            tasks.spawn(async move {
                let outcome =
                    process_match(&fetcher, &classifier, &identity, &match_ref, &abort, timeout).await;
                drop(permit);
                (index, outcome)
            });
        }

        let mut outcomes: Vec<Option<MatchOutcome>> = vec![None; matches.len()];
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => outcomes[index] = outcome,
                Err(e) => warn!("Match task failed to complete: {}", e),
            }
        }
        outcomes
    }

    fn reduce(
        &self,
        matches: &[MatchReference],
        outcomes: Vec<Option<MatchOutcome>>,
    ) -> HeatmapResult<PhaseDatasets> {
        info!("Step 3: Aggregating phases...");

        let mut progress = FetchProgress::new(matches.len());
        let mut accumulator = PhaseAccumulator::new(self.config.grid.canvas);

        for (match_ref, outcome) in matches.iter().zip(outcomes) {
            match outcome {
                Some(Ok(contribution)) if !contribution.is_empty() => {
                    progress.increment_included(contribution.len());
                    accumulator.absorb(contribution);
                }
                Some(Ok(_)) => {
                    warn!("Skipping match {}: no position samples for tracked player", match_ref.match_id);
                    progress.increment_skipped();
                }
                Some(Err(e)) => {
                    warn!("Skipping match {}: {}", match_ref.match_id, e);
                    progress.increment_skipped();
                }
                None => progress.increment_skipped(),
            }
        }

        if accumulator.total_samples() == 0 {
            return Err(HeatmapError::NoData {
                matches: matches.len(),
            });
        }

        info!(
            "  → {} samples from {} matches ({} skipped)\n",
            progress.samples(),
            progress.included(),
            progress.skipped()
        );
        Ok(accumulator.finish())
    }

    fn classifier(&self) -> HeatmapResult<SampleClassifier> {
        let grid = &self.config.grid;
        let normalizer = GridNormalizer::new(grid.world_extent, grid.canvas)?;
        Ok(SampleClassifier::new(normalizer, self.config.phases))
    }

    fn backoff(&self) -> BackoffPolicy {
        let provider = &self.config.provider;
        BackoffPolicy::new(provider.backoff_base_ms, provider.backoff_max_ms, provider.max_retries)
    }
}

/// `None` when the run was aborted before the timeline was requested
async fn process_match<P: MatchDataProvider>(
    fetcher: &TimelineFetcher<P>,
    classifier: &SampleClassifier,
    identity: &PlayerIdentity,
    match_ref: &MatchReference,
    abort: &AbortSignal,
    timeout: Duration,
) -> Option<MatchOutcome> {
    let work = async {
        let slot = fetcher.resolve_slot(match_ref, identity).await?;
        if abort.is_raised() {
            debug!("Abort requested, not fetching timeline of {}", match_ref.match_id);
            return Ok(None);
        }
        let frames = fetcher.fetch_timeline(match_ref).await?;
        let samples = extract(&frames, slot);
        Ok::<_, HeatmapError>(Some(MatchContribution::from_samples(
            &match_ref.match_id,
            &samples,
            classifier,
        )))
    };

    match tokio::time::timeout(timeout, work).await {
        Ok(Ok(contribution)) => contribution.map(Ok),
        Ok(Err(e)) => Some(Err(e)),
        Err(_) => Some(Err(HeatmapError::provider(format!(
            "match {} timed out after {}s",
            match_ref.match_id,
            timeout.as_secs()
        )))),
    }
}
