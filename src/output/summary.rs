use colored::Colorize;

use super::sink::JsonFileSink;
use crate::heatmap::{PhaseBucket, PhaseDatasets};

/// One line of the terminal summary
#[derive(Debug, PartialEq)]
pub struct PhaseSummary {
    pub phase: PhaseBucket,
    pub samples: usize,
    pub occupied_cells: usize,
    pub hottest_cell: u32,
}

pub fn summarize(datasets: &PhaseDatasets) -> Vec<PhaseSummary> {
    datasets
        .iter()
        .map(|dataset| PhaseSummary {
            phase: dataset.phase,
            samples: dataset.len(),
            occupied_cells: dataset.density.as_array().iter().filter(|&&c| c > 0).count(),
            hottest_cell: dataset.density.max(),
        })
        .collect()
}

pub fn print_summary(datasets: &PhaseDatasets, sink: &JsonFileSink) {
    let canvas = datasets.canvas();
    println!(
        "{} {}x{} canvas, {} samples",
        "Heatmap datasets:".bold(),
        canvas.width,
        canvas.height,
        datasets.total_samples().to_string().green()
    );

    for row in summarize(datasets) {
        println!(
            "  {:<28} {:>5} samples {:>5} cells  max {:>3}  {}",
            row.phase.label().cyan(),
            row.samples.to_string().green(),
            row.occupied_cells,
            row.hottest_cell,
            sink.path_for(row.phase).display().to_string().dimmed()
        );
    }
}
