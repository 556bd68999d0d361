use std::time::{Duration, Instant};

/// Wall-clock timer for a single backend round trip.
pub struct Telemetry {
    label: &'static str,
    start: Instant,
}

impl Telemetry {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Emit the elapsed time as a debug event and return it.
    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        tracing::debug!(op = self.label, elapsed_ms = elapsed.as_millis() as u64, "finished");
        elapsed
    }
}
