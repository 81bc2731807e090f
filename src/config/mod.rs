pub mod settings;

pub use settings::{ApiKey, AppConfig, GridSettings, PipelineSettings, ProviderSettings};
