use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::SinkError;

/// Event type of a process-list snapshot.
pub const TOP_INFO_EVENT_TYPE: &str = "objects.top-info";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    /// Metadata about objects the agent itself observes.
    Agent,
}

/// Application event handed to the transport sink.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_type: String,
    pub category: EventCategory,
    pub dimensions: BTreeMap<String, String>,
    pub properties: BTreeMap<String, Value>,
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: SystemTime,
}

impl Event {
    /// Wraps a serialized envelope as a process-list snapshot event.
    pub fn top_info(message: String, timestamp: SystemTime) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("message".to_string(), Value::String(message));
        Event {
            event_type: TOP_INFO_EVENT_TYPE.to_string(),
            category: EventCategory::Agent,
            dimensions: BTreeMap::new(),
            properties,
            timestamp,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.properties.get("message").and_then(Value::as_str)
    }
}

fn serialize_millis<S: Serializer>(ts: &SystemTime, serializer: S) -> Result<S::Ok, S::Error> {
    let millis = ts
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    serializer.serialize_u64(millis)
}

/// Destination for finished events.
pub trait EventSink {
    fn send_event(&mut self, event: Event) -> Result<(), SinkError>;
}

/// Writes each event as one JSON document per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl JsonLinesSink<File> {
    pub fn append(path: &Path) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(file))
    }
}

impl<W: Write> EventSink for JsonLinesSink<W> {
    fn send_event(&mut self, event: Event) -> Result<(), SinkError> {
        serde_json::to_writer(&mut self.writer, &event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps events in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<Event>,
}

impl EventSink for MemorySink {
    fn send_event(&mut self, event: Event) -> Result<(), SinkError> {
        self.events.push(event);
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for Box<S> {
    fn send_event(&mut self, event: Event) -> Result<(), SinkError> {
        (**self).send_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn json_line_layout() {
        let ts = UNIX_EPOCH + Duration::from_millis(1_700_000_000_123);
        let event = Event::top_info(r#"{"t":"eJw=","v":"0.0.30"}"#.to_string(), ts);

        let mut sink = JsonLinesSink::new(Vec::new());
        sink.send_event(event).unwrap();
        let line = String::from_utf8(sink.into_inner()).unwrap();

        assert_eq!(
            line,
            concat!(
                r#"{"eventType":"objects.top-info","category":"AGENT","dimensions":{},"#,
                r#""properties":{"message":"{\"t\":\"eJw=\",\"v\":\"0.0.30\"}"},"#,
                r#""timestamp":1700000000123}"#,
                "\n"
            )
        );
    }

    #[test]
    fn message_accessor() {
        let event = Event::top_info("payload".into(), SystemTime::now());
        assert_eq!(event.message(), Some("payload"));
        assert_eq!(event.event_type, TOP_INFO_EVENT_TYPE);
        assert_eq!(event.category, EventCategory::Agent);
        assert!(event.dimensions.is_empty());
    }

    #[test]
    fn append_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("topinfo_sink_{}", std::process::id()));
        let path = dir.join("nested").join("events.jsonl");
        {
            let mut sink = JsonLinesSink::append(&path).unwrap();
            sink.send_event(Event::top_info("a".into(), SystemTime::now()))
                .unwrap();
            sink.send_event(Event::top_info("b".into(), SystemTime::now()))
                .unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
