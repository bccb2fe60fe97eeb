use std::time::{Duration, SystemTime};

/// One process as observed during a single sampling cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessFact {
    pub pid: u32,
    pub created_at: SystemTime,
    pub user: String,
    pub priority: i32,
    pub nice: String,
    pub virtual_memory_bytes: u64,
    pub resident_bytes: u64,
    pub shared_bytes: u64,
    pub status: String,
    pub memory_percent: f64,
    pub cpu_time: Duration,
    pub command: String,
}

/// Identity used to correlate a process across cycles.
///
/// A recycled pid running the exact same command line maps to the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProcessKey {
    pub pid: u32,
    pub command: String,
}

impl ProcessFact {
    pub fn key(&self) -> ProcessKey {
        ProcessKey {
            pid: self.pid,
            command: self.command.clone(),
        }
    }
}

/// Derives the unix nice value shown next to a kernel scheduling priority.
pub fn derive_nice(priority: Option<i32>) -> (i32, String) {
    match priority {
        Some(40) => (40, "0".to_string()),
        Some(p) => (p, (p - 20).to_string()),
        None => (0, "0".to_string()),
    }
}

/// Picks the full command line, falling back to the short name when the
/// command line is unavailable (kernel threads, zombies, permission errors).
pub fn display_command(cmd: &str, name: &str) -> String {
    let trimmed = cmd.trim();
    if trimmed.is_empty() {
        name.to_string()
    } else {
        trimmed.to_string()
    }
}
