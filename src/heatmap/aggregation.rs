use super::normalization::GridNormalizer;
use super::phases::PhaseBoundaries;
use super::types::{CanvasSize, GridPoint, PhaseBucket, PhaseDatasets};
use crate::domain::RawSample;

/// Normalizes a sample and decides which phase it belongs to
#[derive(Debug, Clone, Copy)]
pub struct SampleClassifier {
    normalizer: GridNormalizer,
    boundaries: PhaseBoundaries,
}

impl SampleClassifier {
    pub fn new(normalizer: GridNormalizer, boundaries: PhaseBoundaries) -> Self {
        Self {
            normalizer,
            boundaries,
        }
    }

    pub fn canvas(&self) -> CanvasSize {
        self.normalizer.canvas()
    }

    pub fn classify(&self, sample: &RawSample) -> PhasedPoint {
        PhasedPoint {
            phase: self.boundaries.assign(sample.timestamp_ms),
            point: self.normalizer.normalize(sample),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhasedPoint {
    pub phase: PhaseBucket,
    pub point: GridPoint,
}

/// Normalized output of one match, ready to be merged
#[derive(Debug, Clone, PartialEq)]
pub struct MatchContribution {
    pub match_id: String,
    pub points: Vec<PhasedPoint>,
}

impl MatchContribution {
    pub fn from_samples(
        match_id: impl Into<String>,
        samples: &[RawSample],
        classifier: &SampleClassifier,
    ) -> Self {
        Self {
            match_id: match_id.into(),
            points: samples.iter().map(|s| classifier.classify(s)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Sole writer of the three phase datasets for a run
#[derive(Debug)]
pub struct PhaseAccumulator {
    datasets: PhaseDatasets,
    matches: usize,
}

impl PhaseAccumulator {
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            datasets: PhaseDatasets::new(canvas),
            matches: 0,
        }
    }

    pub fn absorb(&mut self, contribution: MatchContribution) {
        if contribution.is_empty() {
            return;
        }
        for PhasedPoint { phase, point } in contribution.points {
            self.datasets.get_mut(phase).push(point);
        }
        self.matches += 1;
    }

    pub fn contributing_matches(&self) -> usize {
        self.matches
    }

    pub fn total_samples(&self) -> usize {
        self.datasets.total_samples()
    }

    pub fn finish(self) -> PhaseDatasets {
        self.datasets
    }
}

/// Bucket and count every sample in order
pub fn aggregate(samples: &[RawSample], classifier: &SampleClassifier) -> PhaseDatasets {
    let mut datasets = PhaseDatasets::new(classifier.canvas());
    for sample in samples {
        let PhasedPoint { phase, point } = classifier.classify(sample);
        datasets.get_mut(phase).push(point);
    }
    datasets
}
