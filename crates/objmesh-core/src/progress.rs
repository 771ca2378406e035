//! Progress reporting for the two load phases.
//!
//! Observers are called synchronously from whichever thread runs the load.
//! Marshaling onto a UI thread is the observer's job.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadProgress {
    /// Text scan: bytes consumed out of the whole buffer.
    Scan {
        total_bytes: usize,
        consumed_bytes: usize,
    },
    /// Vertex assembly: face corners processed out of all collected corners.
    Resolve {
        total_corners: usize,
        processed_corners: usize,
    },
}

impl LoadProgress {
    /// Completion ratio of the current phase in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        let (total, done) = match *self {
            LoadProgress::Scan {
                total_bytes,
                consumed_bytes,
            } => (total_bytes, consumed_bytes),
            LoadProgress::Resolve {
                total_corners,
                processed_corners,
            } => (total_corners, processed_corners),
        };
        if total == 0 {
            1.0
        } else {
            (done as f64 / total as f64).min(1.0)
        }
    }
}

pub trait ProgressObserver {
    fn report(&mut self, progress: LoadProgress);
}

/// Observer that drops every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn report(&mut self, _progress: LoadProgress) {}
}

impl<F: FnMut(LoadProgress)> ProgressObserver for F {
    fn report(&mut self, progress: LoadProgress) {
        self(progress)
    }
}

/// Rate limiter for progress reports.
///
/// Always lets the first (`done == 0`) and last (`done == total`) report
/// through; in between, reports only once `step` more units were done.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    total: usize,
    step: usize,
    next: usize,
    finished: bool,
}

impl ProgressThrottle {
    pub fn new(total: usize, step: usize) -> Self {
        Self {
            total,
            step: step.max(1),
            next: 0,
            finished: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn should_report(&mut self, done: usize) -> bool {
        if self.finished {
            return false;
        }
        if done >= self.total {
            self.finished = true;
            return true;
        }
        if done >= self.next {
            self.next = done.saturating_add(self.step);
            return true;
        }
        false
    }
}
