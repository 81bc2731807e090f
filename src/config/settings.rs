use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::heatmap::{CanvasSize, PhaseBoundaries};

const API_KEY_VARS: [&str; 2] = ["RIOT_API_KEY", "api_key_riot"];
const REGION_VAR: &str = "RIOT_REGION";
/// Largest page the match-list endpoint serves
pub const MAX_MATCH_COUNT: usize = 100;

/// Provider credential, passed through to request headers untouched
#[derive(Clone, Default, PartialEq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub api_key: ApiKey,
    pub region: String,
    pub rate_limit_ms: u64,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub backoff_base_ms: u64,
    pub backoff_max_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: ApiKey::default(),
            region: "americas".to_string(),
            rate_limit_ms: 100, // 10 req/sec
            user_agent: "LaneHeatmap/0.1",
            timeout_secs: 30,
            max_retries: 3,
            backoff_base_ms: 1000,
            backoff_max_ms: 16_000,
        }
    }
}

impl ProviderSettings {
    pub fn api_base_url(&self) -> String {
        format!("https://{}.api.riotgames.com", self.region)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GridSettings {
    /// Side length of the square map in game units
    pub world_extent: f64,
    pub canvas: CanvasSize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            world_extent: 16_000.0,
            canvas: CanvasSize::new(512, 512),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub match_count: usize,
    pub max_concurrent_fetches: usize,
    pub match_timeout_secs: u64,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            match_count: 10,
            max_concurrent_fetches: 4,
            match_timeout_secs: 120,
        }
    }
}

impl PipelineSettings {
    pub fn match_timeout(&self) -> Duration {
        Duration::from_secs(self.match_timeout_secs)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub provider: ProviderSettings,
    pub grid: GridSettings,
    pub phases: PhaseBoundaries,
    pub pipeline: PipelineSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the credential and region from the environment
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new();
        config.provider.api_key = read_api_key()?;
        if let Ok(region) = std::env::var(REGION_VAR) {
            config.provider.region = region;
        }
        Ok(config)
    }

    pub fn with_region(mut self, region: Option<String>) -> Self {
        if let Some(region) = region {
            self.provider.region = region;
        }
        self
    }

    pub fn with_match_count(mut self, count: usize) -> Self {
        self.pipeline.match_count = count.clamp(1, MAX_MATCH_COUNT);
        self
    }
}

fn read_api_key() -> Result<ApiKey> {
    API_KEY_VARS
        .iter()
        .find_map(|name| std::env::var(name).ok())
        .filter(|key| !key.trim().is_empty())
        .map(ApiKey::new)
        .with_context(|| format!("Missing provider API key, set {}", API_KEY_VARS[0]))
}
