use std::collections::HashMap;
use std::time::{Duration, SystemTime};

use crate::system::process::ProcessKey;

/// Turns cumulative CPU counters into utilization percentages across cycles.
///
/// Entries are never pruned: keys of exited processes stay in the map for the
/// lifetime of the tracker.
#[derive(Debug, Default)]
pub struct RateTracker {
    last_cpu: HashMap<ProcessKey, Duration>,
}

impl RateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `cpu_time` for `key` and returns the utilization since the
    /// previous observation.
    ///
    /// A known key is measured over `interval`. A key seen for the first time
    /// is measured from `created_at` to `now`, as if its counter started at
    /// zero. A zero-length window yields `0.0`. Negative results (counter
    /// discontinuities, clock skew) are returned as-is.
    pub fn observe(
        &mut self,
        key: ProcessKey,
        cpu_time: Duration,
        created_at: SystemTime,
        now: SystemTime,
        interval: Duration,
    ) -> f64 {
        let (window, last) = match self.last_cpu.get(&key) {
            Some(last) => (interval.as_secs_f64(), last.as_secs_f64()),
            None => (signed_elapsed(created_at, now), 0.0),
        };
        self.last_cpu.insert(key, cpu_time);

        if window == 0.0 {
            return 0.0;
        }
        100.0 * (cpu_time.as_secs_f64() - last) / window
    }

    pub fn last(&self, key: &ProcessKey) -> Option<Duration> {
        self.last_cpu.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.last_cpu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_cpu.is_empty()
    }
}

fn signed_elapsed(from: SystemTime, to: SystemTime) -> f64 {
    match to.duration_since(from) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(err) => -err.duration().as_secs_f64(),
    }
}
