use super::process::derive_nice;

pub trait PlatformExtensions {
    fn process_priority(pid: u32) -> Option<i32>;
    fn process_shared_memory(pid: u32) -> Option<u64>;

    /// Priority and nice pair reported for `pid`. Unix derives nice from the
    /// kernel priority; platforms without nice override this.
    fn process_scheduling(pid: u32) -> (i32, String) {
        derive_nice(Self::process_priority(pid))
    }
}

#[cfg(any(target_os = "windows", test))]
mod priority_class;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

/// Scheduling priority as reported by the OS (20 is the default on unix).
pub fn process_priority(pid: u32) -> Option<i32> {
    platform_impl::Platform::process_priority(pid)
}

/// Priority and nice value as encoded in a process record.
pub fn process_scheduling(pid: u32) -> (i32, String) {
    platform_impl::Platform::process_scheduling(pid)
}

/// Shared memory in bytes. `None` means the process could not be inspected.
pub fn process_shared_memory(pid: u32) -> Option<u64> {
    platform_impl::Platform::process_shared_memory(pid)
}
