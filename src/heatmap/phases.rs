use super::types::PhaseBucket;
use crate::errors::{HeatmapError, HeatmapResult};

pub const EARLY_END_MS: u64 = 600_000; // 10 min
pub const MID_END_MS: u64 = 1_200_000; // 20 min

/// Timestamp boundaries splitting a match into three phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseBoundaries {
    early_end_ms: u64,
    mid_end_ms: u64,
}

impl Default for PhaseBoundaries {
    fn default() -> Self {
        Self {
            early_end_ms: EARLY_END_MS,
            mid_end_ms: MID_END_MS,
        }
    }
}

impl PhaseBoundaries {
    pub fn new(early_end_ms: u64, mid_end_ms: u64) -> HeatmapResult<Self> {
        if early_end_ms == 0 || early_end_ms >= mid_end_ms {
            return Err(HeatmapError::InvalidInput(format!(
                "phase boundaries must satisfy 0 < early ({}) < mid ({})",
                early_end_ms, mid_end_ms
            )));
        }
        Ok(Self {
            early_end_ms,
            mid_end_ms,
        })
    }

    pub fn early_end_ms(&self) -> u64 {
        self.early_end_ms
    }

    pub fn mid_end_ms(&self) -> u64 {
        self.mid_end_ms
    }

    pub fn assign(&self, timestamp_ms: u64) -> PhaseBucket {
        if timestamp_ms < self.early_end_ms {
            PhaseBucket::Early
        } else if timestamp_ms < self.mid_end_ms {
            PhaseBucket::Mid
        } else {
            PhaseBucket::Late
        }
    }
}

/// Phase of a timestamp under the standard 10/20 minute split
pub fn assign_phase(timestamp_ms: u64) -> PhaseBucket {
    PhaseBoundaries::default().assign(timestamp_ms)
}
