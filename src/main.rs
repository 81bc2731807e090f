use anyhow::Result;

use lane_heatmap::cli::Command;
use lane_heatmap::{handle_analyze, handle_completions, interpret, AnalyzeRequest};

fn main() {
    load_env_file();
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn load_env_file() {
    let _ = dotenvy::dotenv();
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(command)
}

fn execute_command(command: Command) -> Result<()> {
    match command {
        Command::Analyze {
            game_name,
            tag,
            count,
            region,
            output_dir,
        } => handle_analyze(AnalyzeRequest {
            game_name,
            tag,
            count,
            region,
            output_dir,
        }),
        Command::Completions { shell } => handle_completions(shell),
    }
}
