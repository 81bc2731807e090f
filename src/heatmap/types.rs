use std::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Pixel resolution of the visualization canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(&self, point: GridPoint) -> bool {
        point.x < self.width && point.y < self.height
    }
}

/// Canvas cell, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: u32,
    pub y: u32,
}

impl GridPoint {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseBucket {
    Early, // 0-10 min
    Mid,   // 10-20 min
    Late,  // 20+ min
}

impl PhaseBucket {
    pub const ALL: [PhaseBucket; 3] = [PhaseBucket::Early, PhaseBucket::Mid, PhaseBucket::Late];

    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseBucket::Early => "early",
            PhaseBucket::Mid => "mid",
            PhaseBucket::Late => "late",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PhaseBucket::Early => "Before 10 minutes",
            PhaseBucket::Mid => "Between 10 and 20 minutes",
            PhaseBucket::Late => "After 20 minutes",
        }
    }

    fn index(&self) -> usize {
        match self {
            PhaseBucket::Early => 0,
            PhaseBucket::Mid => 1,
            PhaseBucket::Late => 2,
        }
    }
}

impl fmt::Display for PhaseBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-cell occurrence counts, stored row-major as `[[y, x]]`
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    cells: Array2<u32>,
}

impl DensityGrid {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            cells: Array2::zeros((canvas.height as usize, canvas.width as usize)),
        }
    }

    pub fn increment(&mut self, point: GridPoint) {
        if let Some(cell) = self.cells.get_mut((point.y as usize, point.x as usize)) {
            *cell += 1;
        }
    }

    pub fn count(&self, point: GridPoint) -> u32 {
        self.cells
            .get((point.y as usize, point.x as usize))
            .copied()
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().map(|&c| c as u64).sum()
    }

    pub fn max(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    pub fn as_array(&self) -> &Array2<u32> {
        &self.cells
    }
}

/// Points and density grid of a single game phase
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseDataset {
    pub phase: PhaseBucket,
    pub points: Vec<GridPoint>,
    pub density: DensityGrid,
}

impl PhaseDataset {
    pub fn new(phase: PhaseBucket, canvas: CanvasSize) -> Self {
        Self {
            phase,
            points: Vec::new(),
            density: DensityGrid::new(canvas),
        }
    }

    pub fn push(&mut self, point: GridPoint) {
        self.points.push(point);
        self.density.increment(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The three phase datasets produced by one run
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseDatasets {
    canvas: CanvasSize,
    datasets: [PhaseDataset; 3],
}

impl PhaseDatasets {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            datasets: PhaseBucket::ALL.map(|phase| PhaseDataset::new(phase, canvas)),
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn get(&self, phase: PhaseBucket) -> &PhaseDataset {
        &self.datasets[phase.index()]
    }

    pub fn get_mut(&mut self, phase: PhaseBucket) -> &mut PhaseDataset {
        &mut self.datasets[phase.index()]
    }

    pub fn early(&self) -> &PhaseDataset {
        self.get(PhaseBucket::Early)
    }

    pub fn mid(&self) -> &PhaseDataset {
        self.get(PhaseBucket::Mid)
    }

    pub fn late(&self) -> &PhaseDataset {
        self.get(PhaseBucket::Late)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PhaseDataset> {
        self.datasets.iter()
    }

    pub fn total_samples(&self) -> usize {
        self.datasets.iter().map(PhaseDataset::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_grid_shape_and_counts() {
        let mut grid = DensityGrid::new(CanvasSize::new(4, 3));
        assert_eq!(grid.dimensions(), (3, 4));

        grid.increment(GridPoint::new(3, 2));
        grid.increment(GridPoint::new(3, 2));
        grid.increment(GridPoint::new(0, 0));

        assert_eq!(grid.count(GridPoint::new(3, 2)), 2);
        assert_eq!(grid.total(), 3);
        assert_eq!(grid.max(), 2);
        assert_eq!(grid.rows()[2], vec![0, 0, 0, 2]);
    }

    #[test]
    fn test_out_of_canvas_point_is_ignored() {
        let mut grid = DensityGrid::new(CanvasSize::new(2, 2));
        grid.increment(GridPoint::new(2, 0));
        assert_eq!(grid.total(), 0);
        assert_eq!(grid.count(GridPoint::new(5, 5)), 0);
    }

    #[test]
    fn test_datasets_hold_one_entry_per_phase() {
        let mut datasets = PhaseDatasets::new(CanvasSize::new(8, 8));
        datasets.get_mut(PhaseBucket::Mid).push(GridPoint::new(1, 1));

        let phases: Vec<_> = datasets.iter().map(|d| d.phase).collect();
        assert_eq!(phases, PhaseBucket::ALL.to_vec());
        assert_eq!(datasets.mid().len(), 1);
        assert!(datasets.early().is_empty());
        assert_eq!(datasets.total_samples(), 1);
    }
}
