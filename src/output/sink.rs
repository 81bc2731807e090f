use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::heatmap::{CanvasSize, GridPoint, PhaseBucket, PhaseDataset};

/// Consumer of normalized phase datasets (plotting, image compositing, ...)
pub trait RenderingSink {
    fn render(&self, dataset: &PhaseDataset, canvas: CanvasSize) -> Result<()>;
}

/// What a renderer receives for one phase
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderPayload {
    pub phase: PhaseBucket,
    pub label: String,
    pub canvas_size: CanvasSize,
    pub points: Vec<GridPoint>,
    pub density: Vec<Vec<u32>>,
}

impl RenderPayload {
    pub fn new(dataset: &PhaseDataset, canvas: CanvasSize) -> Self {
        Self {
            phase: dataset.phase,
            label: dataset.phase.label().to_string(),
            canvas_size: canvas,
            points: dataset.points.clone(),
            density: dataset.density.rows(),
        }
    }
}

/// Writes one JSON document per phase for an external plotter
pub struct JsonFileSink {
    output_dir: PathBuf,
    stem: String,
}

impl JsonFileSink {
    /// Create the sink, making sure the output directory exists
    pub fn new<P: AsRef<Path>>(output_dir: P, stem: &str) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir).context("Failed to create output directory")?;

        Ok(Self {
            output_dir,
            stem: sanitize_stem(stem),
        })
    }

    pub fn path_for(&self, phase: PhaseBucket) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.json", self.stem, phase.as_str()))
    }

    /// Load a previously written payload
    pub fn load(&self, phase: PhaseBucket) -> Result<Option<RenderPayload>> {
        let path = self.path_for(phase);
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let payload = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse JSON from {:?}", path))?;
        Ok(Some(payload))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string(data)?;
        fs::write(path, json).context("Failed to write heatmap file")?;
        Ok(())
    }
}

impl RenderingSink for JsonFileSink {
    fn render(&self, dataset: &PhaseDataset, canvas: CanvasSize) -> Result<()> {
        let path = self.path_for(dataset.phase);
        let payload = RenderPayload::new(dataset, canvas);
        self.write_json(&path, &payload)?;
        info!("Saved {} points for phase {} to {}", dataset.len(), dataset.phase, path.display());
        Ok(())
    }
}

fn sanitize_stem(stem: &str) -> String {
    stem.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
