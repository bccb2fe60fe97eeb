//! Escape, compress and version a snapshot aggregate for the wire.

use std::io::{self, Read};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use flate2::read::ZlibDecoder;
use flate2::{Compress, Compression, FlushCompress, Status};
use serde::{Deserialize, Serialize};

use crate::error::PackageError;

/// Identifies the record layout produced by [`crate::encode`]. Bump it
/// whenever the field list or field order changes.
pub const SCHEMA_VERSION: &str = "0.0.30";

/// Compression stage of the packaging pipeline.
pub trait PayloadCompressor {
    /// Compresses `input` as one complete stream. The returned slice is
    /// valid until the next call.
    fn compress(&mut self, input: &[u8]) -> io::Result<&[u8]>;
}

/// Zlib stream that is reset between payloads instead of being rebuilt.
pub struct ZlibCompressor {
    stream: Compress,
    out: Vec<u8>,
}

impl ZlibCompressor {
    pub fn new(level: Compression) -> Self {
        Self {
            stream: Compress::new(level, true),
            out: Vec::new(),
        }
    }
}

impl Default for ZlibCompressor {
    fn default() -> Self {
        Self::new(Compression::default())
    }
}

impl PayloadCompressor for ZlibCompressor {
    fn compress(&mut self, input: &[u8]) -> io::Result<&[u8]> {
        self.stream.reset();
        self.out.clear();
        self.out.reserve(input.len() / 2 + 64);

        let start = self.stream.total_in();
        loop {
            let consumed = (self.stream.total_in() - start) as usize;
            if self.out.len() == self.out.capacity() {
                self.out.reserve(self.out.capacity().max(64));
            }
            let status = self
                .stream
                .compress_vec(&input[consumed..], &mut self.out, FlushCompress::Finish)
                .map_err(io::Error::other)?;
            if matches!(status, Status::StreamEnd) {
                return Ok(&self.out);
            }
        }
    }
}

/// Outer wire object: `{"t":"<base64>","v":"<schema version>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "t")]
    pub payload: String,
    #[serde(rename = "v")]
    pub version: String,
}

impl Envelope {
    pub fn to_json(&self) -> Result<String, PackageError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reverses the packaging pipeline, yielding the original aggregate.
    pub fn unpack(&self) -> io::Result<String> {
        let compressed = STANDARD
            .decode(&self.payload)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let mut escaped = String::new();
        ZlibDecoder::new(compressed.as_slice()).read_to_string(&mut escaped)?;
        Ok(unescape_backslashes(&escaped))
    }
}

/// Runs the escape → compress → base64 → envelope pipeline.
pub struct Packager<C = ZlibCompressor> {
    compressor: C,
}

impl Default for Packager<ZlibCompressor> {
    fn default() -> Self {
        Self::new(ZlibCompressor::default())
    }
}

impl<C: PayloadCompressor> Packager<C> {
    pub fn new(compressor: C) -> Self {
        Self { compressor }
    }

    pub fn pack(&mut self, aggregate: &str) -> Result<Envelope, PackageError> {
        // The payload travels as a string value inside another structure.
        let escaped = escape_backslashes(aggregate);
        let compressed = self
            .compressor
            .compress(escaped.as_bytes())
            .map_err(PackageError::Compress)?;

        Ok(Envelope {
            payload: STANDARD.encode(compressed),
            version: SCHEMA_VERSION.to_string(),
        })
    }
}

pub fn escape_backslashes(input: &str) -> String {
    input.replace('\\', "\\\\")
}

pub fn unescape_backslashes(input: &str) -> String {
    input.replace("\\\\", "\\")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl PayloadCompressor for Broken {
        fn compress(&mut self, _input: &[u8]) -> io::Result<&[u8]> {
            Err(io::Error::other("deflate stream error"))
        }
    }

    #[test]
    fn escape_doubles_backslashes() {
        assert_eq!(escape_backslashes(r"C:\app.exe"), r"C:\\app.exe");
        assert_eq!(escape_backslashes(r"a\\b"), r"a\\\\b");
        assert_eq!(escape_backslashes("plain"), "plain");
    }

    #[test]
    fn unescape_inverts_escape() {
        for s in [r"C:\app.exe", r"\\server\share", r"trailing\", "none"] {
            assert_eq!(unescape_backslashes(&escape_backslashes(s)), s);
        }
    }

    #[test]
    fn envelope_json_shape() {
        let mut packager = Packager::default();
        let envelope = packager.pack(r#"{"1":["root"]}"#).unwrap();
        let json = envelope.to_json().unwrap();
        assert!(json.starts_with("{\"t\":\""));
        assert!(json.ends_with(&format!("\",\"v\":\"{SCHEMA_VERSION}\"}}")));
    }

    #[test]
    fn pack_unpack_with_windows_paths() {
        let aggregate = r#"{"4":["SYSTEM",8,"-12",10,5,0,"running",0.00,0.01,"00:01.00","C:\app.exe"]}"#;
        let mut packager = Packager::default();
        let envelope = packager.pack(aggregate).unwrap();

        let compressed = STANDARD.decode(&envelope.payload).unwrap();
        let mut escaped = String::new();
        ZlibDecoder::new(compressed.as_slice())
            .read_to_string(&mut escaped)
            .unwrap();
        assert!(escaped.contains(r"C:\\app.exe"));

        assert_eq!(envelope.unpack().unwrap(), aggregate);
    }

    #[test]
    fn compressor_is_reusable() {
        let mut packager = Packager::default();
        let first = packager.pack("{\"1\":[\"a\"]}").unwrap();
        let second = packager.pack("{\"2\":[\"b\"]}").unwrap();
        let again = packager.pack("{\"1\":[\"a\"]}").unwrap();
        assert_eq!(first, again);
        assert_eq!(second.unpack().unwrap(), "{\"2\":[\"b\"]}");
    }

    #[test]
    fn large_payloads_grow_the_buffer() {
        let aggregate: String = (0..20_000)
            .map(|i| format!("\"{i}\":[\"u{}\",{}]", i % 13, i * 7919 % 104_729))
            .collect::<Vec<_>>()
            .join(",");
        let mut packager = Packager::default();
        let envelope = packager.pack(&aggregate).unwrap();
        assert_eq!(envelope.unpack().unwrap(), aggregate);
    }

    #[test]
    fn compression_failure_yields_no_envelope() {
        let mut packager = Packager::new(Broken);
        let err = packager.pack("{}").unwrap_err();
        assert!(matches!(err, PackageError::Compress(_)));
        assert_eq!(err.to_string(), "couldn't compress process list");
    }
}
