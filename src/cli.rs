use std::path::PathBuf;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config::settings::MAX_MATCH_COUNT;

#[derive(Parser, Debug)]
#[command(author, version, about = "lane-heatmap: where a player stands, early, mid and late game")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Build early/mid/late position datasets from recent ranked games
    Analyze {
        /// Riot ID game name
        #[arg(short = 'n', long)]
        game_name: String,
        /// Riot ID tag line, a leading '#' is accepted
        #[arg(short, long)]
        tag: String,
        /// Number of recent ranked matches to use
        #[arg(
            short,
            long,
            default_value_t = 10,
            value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_MATCH_COUNT as u64)
        )]
        count: usize,
        /// Regional routing value (americas, europe, asia, sea)
        #[arg(short, long)]
        region: Option<String>,
        /// Directory receiving one JSON dataset per phase
        #[arg(short, long, default_value = "heatmaps")]
        output_dir: PathBuf,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
