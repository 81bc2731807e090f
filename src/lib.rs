pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod heatmap;
pub mod http;
pub mod output;
pub mod rate_limiter;
pub mod services;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::warn;

use crate::api::RiotClient;
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::normalize_tag;
use crate::output::summary::print_summary;
use crate::output::{JsonFileSink, RenderingSink};
use crate::services::{AbortSignal, PipelineService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

/// Arguments of the `analyze` command
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub game_name: String,
    pub tag: String,
    pub count: usize,
    pub region: Option<String>,
    pub output_dir: PathBuf,
}

pub fn handle_analyze(request: AnalyzeRequest) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env()?
            .with_region(request.region.clone())
            .with_match_count(request.count);
        let client = RiotClient::new(&config.provider)?;
        let service = PipelineService::new(client, config);

        let (handle, signal) = AbortSignal::channel();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, finishing matches already in flight");
                handle.abort();
            }
        });

        let datasets = service
            .run_with_abort(&request.game_name, &request.tag, &signal)
            .await?;

        let stem = format!("{}_{}", request.game_name.trim(), normalize_tag(&request.tag));
        let sink = JsonFileSink::new(&request.output_dir, &stem)?;
        for dataset in datasets.iter() {
            sink.render(dataset, datasets.canvas())?;
        }

        print_summary(&datasets, &sink);
        Ok(())
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
