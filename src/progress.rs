//! Progress reports for long enumerations. Reporting never influences the results.

/// Receives progress reports from [`Eft`](crate::Eft) queries.
pub trait Progress {
    fn start(&mut self, stage: &str);

    /// `done` out of `total` items of the current stage have been processed.
    fn update(&mut self, done: usize, total: usize);

    fn finish(&mut self, stage: &str);
}

/// Discards every report.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn start(&mut self, _stage: &str) {}

    fn update(&mut self, _done: usize, _total: usize) {}

    fn finish(&mut self, _stage: &str) {}
}

/// Emits `tracing` events, at most one per `step` percent of a stage.
#[derive(Clone, Debug)]
pub struct TracingProgress {
    stage: String,
    step: usize,
    last_percent: Option<usize>,
}

impl TracingProgress {
    pub fn new(step: usize) -> Self {
        Self {
            stage: String::new(),
            step: step.max(1),
            last_percent: None,
        }
    }
}

impl Default for TracingProgress {
    fn default() -> Self {
        Self::new(2)
    }
}

impl Progress for TracingProgress {
    fn start(&mut self, stage: &str) {
        self.stage = stage.to_owned();
        self.last_percent = None;
        tracing::info!("{stage}...");
    }

    fn update(&mut self, done: usize, total: usize) {
        let percent = (done * 100).checked_div(total).unwrap_or(100);
        let due = match self.last_percent {
            None => true,
            Some(last) => percent >= last + self.step,
        };
        if due {
            self.last_percent = Some(percent);
            tracing::info!(done, total, "{} ({done}/{total})", self.stage);
        }
    }

    fn finish(&mut self, stage: &str) {
        tracing::info!("{stage}... done.");
    }
}
