use log::info;

/// Track how many matches contributed samples and how many were excluded
#[derive(Debug)]
pub struct FetchProgress {
    total: usize,
    included: usize,
    skipped: usize,
    samples: usize,
}

impl FetchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            included: 0,
            skipped: 0,
            samples: 0,
        }
    }

    pub fn increment_included(&mut self, samples: usize) {
        self.included += 1;
        self.samples += samples;
        self.log_progress();
    }

    pub fn increment_skipped(&mut self) {
        self.skipped += 1;
        self.log_progress();
    }

    pub fn current_count(&self) -> usize {
        self.included + self.skipped
    }

    pub fn included(&self) -> usize {
        self.included
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    fn log_progress(&self) {
        let current = self.current_count();
        if should_log(current, self.total) {
            info!(
                "  → Progress: {}/{} matches ({} included, {} skipped, {} samples)",
                current, self.total, self.included, self.skipped, self.samples
            );
        }
    }
}

fn should_log(current: usize, total: usize) -> bool {
    is_milestone(current) || is_complete(current, total)
}

fn is_milestone(count: usize) -> bool {
    count % 5 == 0
}

fn is_complete(current: usize, total: usize) -> bool {
    current == total
}
