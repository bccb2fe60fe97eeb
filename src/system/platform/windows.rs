use windows_sys::Win32::{
    Foundation::CloseHandle,
    System::Threading::{GetPriorityClass, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION},
};

use super::PlatformExtensions;
use super::priority_class::base_priority;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_priority(pid: u32) -> Option<i32> {
        let class = unsafe {
            let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
            if handle.is_null() {
                return None;
            }
            let class = GetPriorityClass(handle);
            CloseHandle(handle);
            class
        };
        base_priority(class)
    }

    fn process_scheduling(pid: u32) -> (i32, String) {
        // Windows has no nice value; the priority column carries the class
        (Self::process_priority(pid).unwrap_or(0), "0".to_string())
    }

    fn process_shared_memory(_pid: u32) -> Option<u64> {
        // Working-set sharing is not reported per process
        Some(0)
    }
}
