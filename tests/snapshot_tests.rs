use std::time::{Duration, SystemTime};

use insta::assert_snapshot;
use topinfo::encode::encode_snapshot;
use topinfo::package::Packager;
use topinfo::system::process::ProcessFact;
use topinfo::tracker::RateTracker;

#[allow(clippy::too_many_arguments)]
fn mock_process(
    pid: u32,
    user: &str,
    priority: i32,
    nice: &str,
    memory: (u64, u64, u64),
    status: &str,
    memory_percent: f64,
    cpu_millis: u64,
    age: Duration,
    command: &str,
    now: SystemTime,
) -> ProcessFact {
    ProcessFact {
        pid,
        created_at: now - age,
        user: user.to_string(),
        priority,
        nice: nice.to_string(),
        virtual_memory_bytes: memory.0,
        resident_bytes: memory.1,
        shared_bytes: memory.2,
        status: status.to_string(),
        memory_percent,
        cpu_time: Duration::from_millis(cpu_millis),
        command: command.to_string(),
    }
}

fn fixture(now: SystemTime) -> Vec<ProcessFact> {
    vec![
        mock_process(
            1,
            "root",
            20,
            "0",
            (171_008_000, 12_288_000, 8_192_000),
            "sleep",
            0.15,
            12_340,
            Duration::from_secs(100),
            "/sbin/init splash",
            now,
        ),
        mock_process(
            842,
            "postgres",
            20,
            "0",
            (2_254_438_400, 67_108_864, 58_720_256),
            "sleep",
            0.78,
            754_250,
            Duration::from_secs(3600),
            "postgres: checkpointer",
            now,
        ),
        // created at the sampling instant: zero-length window
        mock_process(
            31337,
            "svc",
            39,
            "19",
            (1_048_576, 524_288, 0),
            "running",
            0.0,
            1_500,
            Duration::ZERO,
            r"C:\tools\agent.exe --verbose",
            now,
        ),
    ]
}

#[test]
fn canonical_aggregate() {
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let mut tracker = RateTracker::new();
    let aggregate =
        encode_snapshot(&mut tracker, &fixture(now), Duration::from_secs(10), now).unwrap();

    assert_snapshot!("canonical_aggregate", aggregate);
}

#[test]
fn canonical_aggregate_survives_packaging() {
    let now = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let mut tracker = RateTracker::new();
    let aggregate =
        encode_snapshot(&mut tracker, &fixture(now), Duration::from_secs(10), now).unwrap();

    let envelope = Packager::default().pack(&aggregate).unwrap();
    assert_eq!(envelope.version, "0.0.30");
    assert_eq!(envelope.unpack().unwrap(), aggregate);
    assert_eq!(tracker.len(), 3);
}
