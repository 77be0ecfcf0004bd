#![warn(missing_docs)]
//! Test surfaces for biome parity work: reference corpora, parity metrics,
//! JSONL logs, golden snapshots and reproducible sample points.

mod corpus;
mod metrics;
mod points;
mod snapshot;

use anyhow::Result;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub use corpus::*;
pub use metrics::*;
pub use points::*;
pub use snapshot::*;

/// A mismatch between a generated and a recorded biome.
#[derive(Debug, Serialize)]
pub struct MismatchRecord<'a> {
    /// Version label.
    pub version: &'a str,
    /// World seed.
    pub seed: i64,
    /// Cell coordinates `[x, y, z]`.
    pub pos: [i32; 3],
    /// Blocks per cell.
    pub scale: u32,
    /// Recorded biome name.
    pub expected: String,
    /// Generated biome name, or the error text.
    pub actual: String,
}

/// A sink that writes newline-delimited JSON to disk.
pub struct JsonlSink {
    file: BufWriter<File>,
}

impl JsonlSink {
    /// Create a new sink at `path`, creating parent dirs if needed.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;
        Ok(Self {
            file: BufWriter::new(file),
        })
    }

    /// Append one record.
    pub fn write<T: Serialize>(&mut self, record: &T) -> Result<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        Ok(())
    }

    /// Flush buffered lines.
    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn jsonl_sink_writes_one_line_per_record() {
        let path = std::env::temp_dir().join(format!(
            "mismatches-{}.jsonl",
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let mut sink = JsonlSink::create(&path).expect("sink create");
        for seed in [1, 2] {
            sink.write(&MismatchRecord {
                version: "1.12",
                seed,
                pos: [0, 0, 0],
                scale: 4,
                expected: "plains".into(),
                actual: "forest".into(),
            })
            .expect("write succeeds");
        }
        sink.flush().unwrap();
        let contents = fs::read_to_string(&path).expect("file readable");
        assert_eq!(contents.lines().count(), 2);
        assert!(contents.contains("\"expected\":\"plains\""));
    }
}
