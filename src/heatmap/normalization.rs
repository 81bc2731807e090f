use super::types::{CanvasSize, GridPoint};
use crate::domain::RawSample;
use crate::errors::{HeatmapError, HeatmapResult};

/// Maps game-world coordinates (origin bottom-left) onto canvas cells (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridNormalizer {
    world_extent: f64,
    canvas: CanvasSize,
}

impl GridNormalizer {
    pub fn new(world_extent: f64, canvas: CanvasSize) -> HeatmapResult<Self> {
        if !world_extent.is_finite() || world_extent <= 0.0 {
            return Err(HeatmapError::InvalidInput(format!(
                "world extent must be a positive finite number, got {}",
                world_extent
            )));
        }
        if canvas.width == 0 || canvas.height == 0 {
            return Err(HeatmapError::InvalidInput(format!(
                "canvas must have non-zero sides, got {}x{}",
                canvas.width, canvas.height
            )));
        }
        Ok(Self {
            world_extent,
            canvas,
        })
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn world_extent(&self) -> f64 {
        self.world_extent
    }

    pub fn normalize(&self, sample: &RawSample) -> GridPoint {
        let column = scale_axis(sample.x, self.world_extent, self.canvas.width);
        let row = flip_axis(scale_axis(sample.y, self.world_extent, self.canvas.height), self.canvas.height);

        GridPoint::new(
            clamp_to_axis(column, self.canvas.width),
            clamp_to_axis(row, self.canvas.height),
        )
    }
}

/// Free-function form of [`GridNormalizer::normalize`]
pub fn normalize(sample: &RawSample, world_extent: f64, canvas: CanvasSize) -> HeatmapResult<GridPoint> {
    Ok(GridNormalizer::new(world_extent, canvas)?.normalize(sample))
}

fn scale_axis(value: i64, world_extent: f64, cells: u32) -> i64 {
    (value as f64 / world_extent * cells as f64).floor() as i64
}

fn flip_axis(index: i64, cells: u32) -> i64 {
    cells as i64 - 1 - index
}

// Off-map samples land on the nearest edge cell.
fn clamp_to_axis(index: i64, cells: u32) -> u32 {
    let last = cells.saturating_sub(1) as i64;
    index.clamp(0, last) as u32
}
