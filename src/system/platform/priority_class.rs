//! Windows priority classes and the base priority each one schedules at.

const IDLE_PRIORITY_CLASS: u32 = 0x0000_0040;
const BELOW_NORMAL_PRIORITY_CLASS: u32 = 0x0000_4000;
const NORMAL_PRIORITY_CLASS: u32 = 0x0000_0020;
const ABOVE_NORMAL_PRIORITY_CLASS: u32 = 0x0000_8000;
const HIGH_PRIORITY_CLASS: u32 = 0x0000_0080;
const REALTIME_PRIORITY_CLASS: u32 = 0x0000_0100;

/// Base priority of a normal-priority thread in a process of `class`.
pub fn base_priority(class: u32) -> Option<i32> {
    match class {
        IDLE_PRIORITY_CLASS => Some(4),
        BELOW_NORMAL_PRIORITY_CLASS => Some(6),
        NORMAL_PRIORITY_CLASS => Some(8),
        ABOVE_NORMAL_PRIORITY_CLASS => Some(10),
        HIGH_PRIORITY_CLASS => Some(13),
        REALTIME_PRIORITY_CLASS => Some(24),
        _ => None,
    }
}
