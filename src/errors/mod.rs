use std::time::Duration;

use thiserror::Error;

pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Failures raised while building position heatmaps
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeatmapError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited by provider{}", format_retry_after(.retry_after))]
    RateLimited { retry_after: Option<Duration> },

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("No participant slot for the tracked player in match {match_id}")]
    SlotNotFound { match_id: String },

    #[error("No usable position samples across {matches} matches")]
    NoData { matches: usize },
}

impl HeatmapError {
    pub fn provider(message: impl Into<String>) -> Self {
        HeatmapError::Provider(message.into())
    }

    /// Transient failures that may succeed when repeated after a delay
    pub fn is_retryable(&self) -> bool {
        matches!(self, HeatmapError::RateLimited { .. })
    }

    /// Failures that exclude a single match without failing the run
    pub fn is_per_match(&self) -> bool {
        match self {
            HeatmapError::SlotNotFound { .. } => true,
            HeatmapError::Provider(_) => true,
            HeatmapError::RateLimited { .. } => true,
            HeatmapError::NotFound(_) => true,
            HeatmapError::InvalidInput(_) => false,
            HeatmapError::NoData { .. } => false,
        }
    }

    /// Rate limiting that survived every retry becomes a plain provider failure
    pub fn exhausted(self) -> Self {
        match self {
            HeatmapError::RateLimited { .. } => {
                HeatmapError::provider("rate limit persisted after retries")
            }
            other => other,
        }
    }
}

fn format_retry_after(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(" (retry after {}s)", delay.as_secs()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_message_mentions_delay() {
        let err = HeatmapError::RateLimited {
            retry_after: Some(Duration::from_secs(3)),
        };
        assert_eq!(err.to_string(), "Rate limited by provider (retry after 3s)");

        let err = HeatmapError::RateLimited { retry_after: None };
        assert_eq!(err.to_string(), "Rate limited by provider");
    }

    #[test]
    fn test_exhausted_rate_limit_becomes_provider_error() {
        let err = HeatmapError::RateLimited { retry_after: None }.exhausted();
        assert!(matches!(err, HeatmapError::Provider(_)));
        assert!(!err.is_retryable());

        let untouched = HeatmapError::NotFound("x".into()).exhausted();
        assert_eq!(untouched, HeatmapError::NotFound("x".into()));
    }

    #[test]
    fn test_run_level_errors_are_not_per_match() {
        assert!(HeatmapError::SlotNotFound { match_id: "BR1_1".into() }.is_per_match());
        assert!(!HeatmapError::NoData { matches: 0 }.is_per_match());
        assert!(!HeatmapError::InvalidInput("tag".into()).is_per_match());
    }
}
