use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_priority(pid: u32) -> Option<i32> {
        let stat = std::fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
        // comm may contain spaces or parens; priority is the 16th field after it
        let (_, rest) = stat.rsplit_once(')')?;
        rest.split_whitespace().nth(15)?.parse().ok()
    }

    fn process_shared_memory(pid: u32) -> Option<u64> {
        // /proc/{pid}/statm: size resident shared text lib data dt (in pages)
        let path = format!("/proc/{pid}/statm");
        let contents = std::fs::read_to_string(path).ok()?;
        let shared_pages: u64 = contents.split_whitespace().nth(2)?.parse().ok()?;
        Some(shared_pages * page_size())
    }
}

fn page_size() -> u64 {
    let size = unsafe { libc::sysconf(libc::_SC_PAGESIZE) };
    if size > 0 { size as u64 } else { 4096 }
}
