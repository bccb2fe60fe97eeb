use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_priority(pid: u32) -> Option<i32> {
        // Clear errno before call
        unsafe { *libc::__error() = 0 };
        let nice = unsafe { libc::getpriority(libc::PRIO_PROCESS, pid as libc::id_t) };
        // getpriority returns -1 on error, but -1 can also be a valid nice value
        let errno = unsafe { *libc::__error() };
        if nice == -1 && errno != 0 {
            None
        } else {
            // getpriority reports nice; shift into the unix priority range
            Some(nice + 20)
        }
    }

    fn process_shared_memory(_pid: u32) -> Option<u64> {
        // Not exposed per process without task_for_pid privileges
        Some(0)
    }
}
