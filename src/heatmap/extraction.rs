use log::debug;

use crate::domain::{RawSample, Slot, TimelineFrame};

/// Pull the tracked slot's position out of every frame that carries it
pub fn extract(frames: &[TimelineFrame], slot: Slot) -> Vec<RawSample> {
    let mut samples: Vec<RawSample> = Vec::with_capacity(frames.len());

    for frame in frames {
        let Some(position) = frame.position_of(slot) else {
            debug!("Frame at {}ms has no position for slot {}", frame.timestamp_ms, slot);
            continue;
        };

        if is_repeated_timestamp(&samples, frame.timestamp_ms) {
            debug!("Skipping repeated frame timestamp {}ms", frame.timestamp_ms);
            continue;
        }

        samples.push(RawSample::new(frame.timestamp_ms, position.x, position.y));
    }

    samples
}

fn is_repeated_timestamp(samples: &[RawSample], timestamp_ms: u64) -> bool {
    samples
        .last()
        .is_some_and(|last| last.timestamp_ms == timestamp_ms)
}
