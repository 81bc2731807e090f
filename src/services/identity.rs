use std::sync::Arc;

use log::info;

use crate::api::MatchDataProvider;
use crate::domain::{MatchReference, PlayerIdentity, PlayerQuery};
use crate::errors::{HeatmapError, HeatmapResult};
use crate::rate_limiter::{retry_rate_limited, BackoffPolicy};

/// Turns a typed Riot ID into an account and its recent ranked matches
pub struct IdentityResolver<P> {
    provider: Arc<P>,
    backoff: BackoffPolicy,
}

impl<P: MatchDataProvider> IdentityResolver<P> {
    pub fn new(provider: Arc<P>, backoff: BackoffPolicy) -> Self {
        Self { provider, backoff }
    }

    pub async fn resolve(&self, query: &PlayerQuery) -> HeatmapResult<PlayerIdentity> {
        let label = query.riot_id();
        let identity = retry_rate_limited(&self.backoff, &label, || {
            self.provider
                .account_by_riot_id(&query.game_name, &query.tag_line)
        })
        .await
        .map_err(|e| match e {
            HeatmapError::NotFound(_) => {
                HeatmapError::NotFound(format!("No account matches Riot ID {}", label))
            }
            other => other,
        })?;

        info!("Resolved {} to puuid {}", label, identity.puuid);
        Ok(identity)
    }

    /// At most `count` ranked matches, most recent first
    pub async fn recent_ranked_matches(
        &self,
        identity: &PlayerIdentity,
        count: usize,
    ) -> HeatmapResult<Vec<MatchReference>> {
        let label = format!("match list of {}#{}", identity.game_name, identity.tag_line);
        let ids = retry_rate_limited(&self.backoff, &label, || {
            self.provider.ranked_match_ids(&identity.puuid, count)
        })
        .await
        .map_err(|e| match e {
            HeatmapError::NotFound(_) => no_ranked_history(identity),
            other => other.exhausted(),
        })?;

        if ids.is_empty() {
            return Err(no_ranked_history(identity));
        }

        let matches: Vec<MatchReference> = ids.into_iter().take(count).map(MatchReference::new).collect();
        info!("Found {} recent ranked matches", matches.len());
        Ok(matches)
    }
}

fn no_ranked_history(identity: &PlayerIdentity) -> HeatmapError {
    HeatmapError::NotFound(format!(
        "No ranked history for {}#{}",
        identity.game_name, identity.tag_line
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockProvider;

    fn resolver(provider: MockProvider) -> IdentityResolver<MockProvider> {
        IdentityResolver::new(Arc::new(provider), BackoffPolicy::new(1, 2, 2))
    }

    #[tokio::test]
    async fn test_resolves_account() {
        let resolver = resolver(MockProvider::new().with_account("Faker", "KR1", "puuid-faker"));
        let query = PlayerQuery::new("Faker", "#KR1").unwrap();

        let identity = resolver.resolve(&query).await.unwrap();

        assert_eq!(identity.puuid, "puuid-faker");
    }

    #[tokio::test]
    async fn test_unknown_account_is_not_found() {
        let resolver = resolver(MockProvider::new());
        let query = PlayerQuery::new("Nobody", "EUW").unwrap();

        let err = resolver.resolve(&query).await.unwrap_err();

        assert_eq!(
            err,
            HeatmapError::NotFound("No account matches Riot ID Nobody#EUW".to_string())
        );
    }

    #[tokio::test]
    async fn test_persistent_throttling_surfaces_as_rate_limit() {
        let resolver = resolver(
            MockProvider::new().with_account_error(HeatmapError::RateLimited { retry_after: None }),
        );
        let query = PlayerQuery::new("Faker", "KR1").unwrap();

        let err = resolver.resolve(&query).await.unwrap_err();

        assert!(matches!(err, HeatmapError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let resolver = resolver(
            MockProvider::new().with_account_error(HeatmapError::provider("status 503")),
        );
        let query = PlayerQuery::new("Faker", "KR1").unwrap();

        let err = resolver.resolve(&query).await.unwrap_err();

        assert_eq!(err, HeatmapError::provider("status 503"));
    }

    #[tokio::test]
    async fn test_match_list_is_truncated_and_ordered() {
        let resolver = resolver(
            MockProvider::new()
                .with_account("Faker", "KR1", "p")
                .with_match_ids("p", &["KR_5", "KR_4", "KR_3", "KR_2", "KR_1"]),
        );
        let identity = resolver.resolve(&PlayerQuery::new("Faker", "KR1").unwrap()).await.unwrap();

        let matches = resolver.recent_ranked_matches(&identity, 3).await.unwrap();

        let ids: Vec<_> = matches.iter().map(|m| m.match_id.as_str()).collect();
        assert_eq!(ids, vec!["KR_5", "KR_4", "KR_3"]);
    }

    #[tokio::test]
    async fn test_empty_history_is_not_found() {
        let resolver = resolver(MockProvider::new().with_account("Faker", "KR1", "p"));
        let identity = resolver.resolve(&PlayerQuery::new("Faker", "KR1").unwrap()).await.unwrap();

        let err = resolver.recent_ranked_matches(&identity, 10).await.unwrap_err();

        assert_eq!(err, HeatmapError::NotFound("No ranked history for Faker#KR1".to_string()));
    }
}
