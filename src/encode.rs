//! Canonical text layout of a process-list snapshot.
//!
//! Each process becomes one record keyed by its pid:
//!
//! ```text
//! "<pid>":["<user>",<priority>,"<nice>",<vss KB>,<rss KB>,<shared KB>,"<status>",<cpu %>,<mem %>,"<MM:SS.cc>","<command>"]
//! ```
//!
//! and the records of a cycle are wrapped in braces, comma separated. Changing
//! the field list or order requires bumping [`crate::package::SCHEMA_VERSION`].

use std::fmt::Write;
use std::time::{Duration, SystemTime};

use crate::error::EncodeError;
use crate::format::{format_cpu_time, format_percent, kilobytes};
use crate::system::process::ProcessFact;
use crate::tracker::RateTracker;

/// Encodes one process, updating its tracker entry.
pub fn encode_process(
    tracker: &mut RateTracker,
    fact: &ProcessFact,
    interval: Duration,
    now: SystemTime,
) -> String {
    let mut out = String::with_capacity(96 + fact.command.len());
    write_record(&mut out, tracker, fact, interval, now);
    out
}

/// Encodes a whole snapshot in enumeration order.
///
/// Tracker entries are written as each process is encoded, so they stay
/// updated even if the caller later fails to package the result.
pub fn encode_snapshot(
    tracker: &mut RateTracker,
    facts: &[ProcessFact],
    interval: Duration,
    now: SystemTime,
) -> Result<String, EncodeError> {
    if facts.is_empty() {
        return Err(EncodeError::NoProcesses);
    }

    let mut out = String::with_capacity(facts.len() * 128);
    out.push('{');
    for (i, fact) in facts.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_record(&mut out, tracker, fact, interval, now);
    }
    out.push('}');
    Ok(out)
}

fn write_record(
    out: &mut String,
    tracker: &mut RateTracker,
    fact: &ProcessFact,
    interval: Duration,
    now: SystemTime,
) {
    let cpu_percent = tracker.observe(fact.key(), fact.cpu_time, fact.created_at, now, interval);

    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "\"{}\":[\"{}\",{},\"{}\",{},{},{},\"{}\",{},{},\"{}\",\"{}\"]",
        fact.pid,
        fact.user,
        fact.priority,
        fact.nice,
        kilobytes(fact.virtual_memory_bytes),
        kilobytes(fact.resident_bytes),
        kilobytes(fact.shared_bytes),
        fact.status,
        format_percent(cpu_percent),
        format_percent(fact.memory_percent),
        format_cpu_time(fact.cpu_time),
        fact.command,
    );
}
