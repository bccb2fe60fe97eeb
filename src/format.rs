use std::time::Duration;

/// Bytes to whole kilobytes, truncating.
pub fn kilobytes(bytes: u64) -> u64 {
    bytes / 1024
}

/// Formats cumulative CPU time as `MM:SS.cc`.
///
/// Minutes come from the integer part of the total seconds. The seconds field
/// is the floating remainder modulo 60 printed once with two decimals, so the
/// centiseconds are never rounded independently of the seconds.
pub fn format_cpu_time(cpu_time: Duration) -> String {
    let total = cpu_time.as_secs_f64();
    let minutes = total as u64 / 60;
    let seconds = total % 60.0;
    format!("{minutes:02}:{seconds:05.2}")
}

/// Two-decimal rendering used for percentages.
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kilobytes_truncate() {
        assert_eq!(kilobytes(204_800), 200);
        assert_eq!(kilobytes(1023), 0);
        assert_eq!(kilobytes(2047), 1);
        assert_eq!(kilobytes(0), 0);
    }

    #[test]
    fn cpu_time_layout() {
        assert_eq!(format_cpu_time(Duration::from_secs_f64(65.5)), "01:05.50");
        assert_eq!(format_cpu_time(Duration::ZERO), "00:00.00");
        assert_eq!(format_cpu_time(Duration::from_millis(59_990)), "00:59.99");
        assert_eq!(format_cpu_time(Duration::from_secs(3600)), "60:00.00");
        assert_eq!(format_cpu_time(Duration::from_secs(6000 * 60 + 7)), "6000:07.00");
    }

    #[test]
    fn cpu_time_rounds_seconds_as_one_number() {
        // 12.999s: the seconds field rounds up as a whole, never "12.100".
        assert_eq!(format_cpu_time(Duration::from_millis(12_999)), "00:13.00");
        // The remainder can round up to 60.00 without carrying into minutes.
        assert_eq!(format_cpu_time(Duration::from_millis(119_999)), "01:60.00");
    }

    #[test]
    fn percent_two_decimals() {
        assert_eq!(format_percent(655.0), "655.00");
        assert_eq!(format_percent(1.5), "1.50");
        assert_eq!(format_percent(100.0 / 3.0), "33.33");
        assert_eq!(format_percent(-50.0), "-50.00");
    }
}
