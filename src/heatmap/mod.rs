pub mod aggregation;
pub mod extraction;
pub mod normalization;
pub mod phases;
pub mod types;

pub use aggregation::{aggregate, MatchContribution, PhaseAccumulator, PhasedPoint, SampleClassifier};
pub use extraction::extract;
pub use normalization::{normalize, GridNormalizer};
pub use phases::{assign_phase, PhaseBoundaries};
pub use types::{CanvasSize, DensityGrid, GridPoint, PhaseBucket, PhaseDataset, PhaseDatasets};
