use std::time::{Duration, SystemTime};

use color_eyre::eyre::Report;
use tracing::{debug, error};

use crate::encode::encode_snapshot;
use crate::error::CycleError;
use crate::event::{Event, EventSink};
use crate::package::{Packager, PayloadCompressor, ZlibCompressor};
use crate::system::collector::ProcessSource;
use crate::tracker::RateTracker;

/// Summary of a cycle that emitted an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CycleReport {
    pub processes: usize,
    pub message_bytes: usize,
}

/// Drives sampling cycles: enumerate, track, encode, package, emit.
///
/// All per-instance state (the rate tracker and the reused compressor) lives
/// here and is only touched through `&mut self`, one cycle at a time.
pub struct ProcessListMonitor<S, E, C = ZlibCompressor> {
    source: S,
    sink: E,
    packager: Packager<C>,
    tracker: RateTracker,
    interval: Duration,
}

impl<S, E> ProcessListMonitor<S, E, ZlibCompressor>
where
    S: ProcessSource,
    E: EventSink,
{
    pub fn new(source: S, sink: E, interval: Duration) -> Self {
        Self::with_packager(source, sink, Packager::default(), interval)
    }
}

impl<S, E, C> ProcessListMonitor<S, E, C>
where
    S: ProcessSource,
    E: EventSink,
    C: PayloadCompressor,
{
    pub fn with_packager(source: S, sink: E, packager: Packager<C>, interval: Duration) -> Self {
        Self {
            source,
            sink,
            packager,
            tracker: RateTracker::new(),
            interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn tracker(&self) -> &RateTracker {
        &self.tracker
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    /// Runs one cycle, logging instead of returning any failure.
    pub fn tick(&mut self) -> Option<CycleReport> {
        match self.run_cycle(SystemTime::now()) {
            Ok(report) => {
                debug!(
                    processes = report.processes,
                    bytes = report.message_bytes,
                    tracked = self.tracker.len(),
                    "sent process list"
                );
                Some(report)
            }
            Err(err) => {
                let err = Report::new(err);
                error!(error = format_args!("{err:#}"), "process list cycle failed");
                None
            }
        }
    }

    /// Runs one cycle with `now` as the sampling instant.
    ///
    /// Tracker entries written before a packaging or emit failure are kept.
    pub fn run_cycle(&mut self, now: SystemTime) -> Result<CycleReport, CycleError> {
        let facts = self.source.snapshot()?;

        let aggregate = encode_snapshot(&mut self.tracker, &facts, self.interval, now)?;
        let message = self.packager.pack(&aggregate)?.to_json()?;
        let message_bytes = message.len();

        self.sink.send_event(Event::top_info(message, now))?;

        Ok(CycleReport {
            processes: facts.len(),
            message_bytes,
        })
    }
}
