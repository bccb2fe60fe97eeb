use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sysinfo::{
    Process, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, ThreadKind, UpdateKind,
    Users,
};

use super::platform;
use super::process::{ProcessFact, display_command};
use crate::error::SourceError;

/// Produces a fresh process snapshot on every call.
pub trait ProcessSource {
    fn snapshot(&mut self) -> Result<Vec<ProcessFact>, SourceError>;
}

/// `sysinfo`-backed enumeration of the host's processes.
pub struct Collector {
    sys: System,
    users: Users,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut sys = System::new();
        sys.refresh_memory();
        Collector {
            sys,
            users: Users::new(),
        }
    }

    fn refresh(&mut self) {
        self.sys.refresh_memory();
        self.sys.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing()
                .with_memory()
                .with_cpu()
                .with_user(UpdateKind::OnlyIfNotSet)
                .with_cmd(UpdateKind::OnlyIfNotSet),
        );
        self.users.refresh();
    }

    fn observe(&self, process: &Process, total_memory: u64) -> Observed {
        let user = process
            .user_id()
            .and_then(|uid| self.users.get_user_by_id(uid))
            .map(|u| u.name().to_string())
            .unwrap_or_default();

        let name = process.name().to_string_lossy();
        let cmd = process
            .cmd()
            .iter()
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        let resident_bytes = process.memory();
        let memory_percent = if total_memory == 0 {
            0.0
        } else {
            resident_bytes as f64 / total_memory as f64 * 100.0
        };

        Observed {
            pid: process.pid().as_u32(),
            created_at: UNIX_EPOCH + Duration::from_secs(process.start_time()),
            user,
            virtual_memory_bytes: process.virtual_memory(),
            resident_bytes,
            status: status_label(process.status()),
            memory_percent,
            cpu_time: Duration::from_millis(process.accumulated_cpu_time()),
            command: display_command(&cmd, &name),
        }
    }
}

impl ProcessSource for Collector {
    fn snapshot(&mut self) -> Result<Vec<ProcessFact>, SourceError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(SourceError::Unsupported);
        }

        let _span = tracing::debug_span!("collector.snapshot").entered();
        self.refresh();

        let total_memory = self.sys.total_memory();
        let observed: Vec<Observed> = self
            .sys
            .processes()
            .values()
            .filter(|p| !matches!(p.thread_kind(), Some(ThreadKind::Userland)))
            .map(|p| self.observe(p, total_memory))
            .collect();

        let facts = build_facts(observed, &HostIntrospection);
        tracing::debug!(count = facts.len(), "enumerated processes");
        Ok(facts)
    }
}

/// What sysinfo reports for one process.
struct Observed {
    pid: u32,
    created_at: SystemTime,
    user: String,
    virtual_memory_bytes: u64,
    resident_bytes: u64,
    status: &'static str,
    memory_percent: f64,
    cpu_time: Duration,
    command: String,
}

/// Per-process lookups sysinfo doesn't cover.
trait Introspection {
    /// `None` when the process can't be inspected, e.g. it already exited.
    fn shared_memory(&self, pid: u32) -> Option<u64>;
    fn scheduling(&self, pid: u32) -> (i32, String);
}

struct HostIntrospection;

impl Introspection for HostIntrospection {
    fn shared_memory(&self, pid: u32) -> Option<u64> {
        platform::process_shared_memory(pid)
    }

    fn scheduling(&self, pid: u32) -> (i32, String) {
        platform::process_scheduling(pid)
    }
}

/// Completes observations into facts in pid order, dropping any process the
/// platform can no longer inspect.
fn build_facts(
    mut observed: Vec<Observed>,
    introspection: &impl Introspection,
) -> Vec<ProcessFact> {
    observed.sort_unstable_by_key(|o| o.pid);

    let mut facts = Vec::with_capacity(observed.len());
    for o in observed {
        let Some(shared_bytes) = introspection.shared_memory(o.pid) else {
            tracing::trace!(pid = o.pid, "dropping uninspectable process");
            continue;
        };
        let (priority, nice) = introspection.scheduling(o.pid);
        facts.push(ProcessFact {
            pid: o.pid,
            created_at: o.created_at,
            user: o.user,
            priority,
            nice,
            virtual_memory_bytes: o.virtual_memory_bytes,
            resident_bytes: o.resident_bytes,
            shared_bytes,
            status: o.status.to_string(),
            memory_percent: o.memory_percent,
            cpu_time: o.cpu_time,
            command: o.command,
        });
    }
    facts
}

/// Lowercase status words in the vocabulary the backend parser expects.
pub fn status_label(status: ProcessStatus) -> &'static str {
    match status {
        ProcessStatus::Run => "running",
        ProcessStatus::Sleep | ProcessStatus::UninterruptibleDiskSleep => "sleep",
        ProcessStatus::Idle => "idle",
        ProcessStatus::Stop | ProcessStatus::Tracing => "stop",
        ProcessStatus::Zombie => "zombie",
        ProcessStatus::Dead => "dead",
        ProcessStatus::Waking | ProcessStatus::Wakekill | ProcessStatus::Parked => "wait",
        ProcessStatus::LockBlocked => "lock",
        _ => "unknown",
    }
}
