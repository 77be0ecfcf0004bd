//! Golden snapshots of generated grids.
//!
//! Snapshots are canonical pretty JSON with object keys sorted. Tests
//! compare against the file on disk; rerun with `SEEDMAP_UPDATE_SNAPSHOTS=1`
//! to rewrite them. Large grids are stored as a BLAKE3 fingerprint plus a
//! histogram rather than cell by cell.

use anyhow::{Context, Result};
use seedmap_core::BiomeId;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Environment variable that enables snapshot updates.
pub const UPDATE_SNAPSHOTS_ENV: &str = "SEEDMAP_UPDATE_SNAPSHOTS";

/// Assert that `value` matches the JSON snapshot stored at `path`.
///
/// If `SEEDMAP_UPDATE_SNAPSHOTS=1` is set, the snapshot file is written
/// with the current value instead.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if should_update_snapshots() {
        write_snapshot(path, &actual)?;
        return Ok(());
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create/update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    if expected != actual {
        anyhow::bail!(
            "Snapshot mismatch at {} (run with {}=1 to update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        );
    }

    Ok(())
}

/// Summary of a biome grid that changes whenever any cell changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridFingerprint {
    /// Cells per row.
    pub width: usize,
    /// Rows.
    pub height: usize,
    /// BLAKE3 of the row-major ids as little-endian `i32`s, hex encoded.
    pub blake3: String,
    /// Cell count per biome name.
    pub histogram: BTreeMap<String, usize>,
}

/// Fingerprint a row-major `width × height` grid.
pub fn grid_fingerprint(grid: &[BiomeId], width: usize, height: usize) -> GridFingerprint {
    let mut hasher = blake3::Hasher::new();
    let mut histogram = BTreeMap::new();
    for id in grid {
        hasher.update(&id.0.to_le_bytes());
        *histogram.entry(id.to_string()).or_insert(0) += 1;
    }
    GridFingerprint {
        width,
        height,
        blake3: hasher.finalize().to_hex().to_string(),
        histogram,
    }
}

fn should_update_snapshots() -> bool {
    matches!(
        std::env::var(UPDATE_SNAPSHOTS_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("TRUE") | Ok("yes") | Ok("YES")
    )
}

fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, contents)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))
}

fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let value = canonicalize_value(value);
    let mut s = serde_json::to_string_pretty(&value).context("Failed to format snapshot JSON")?;
    s.push('\n');
    Ok(s)
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut out = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                out.insert(k, canonicalize_value(v));
            }
            Value::Object(out)
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_tracks_every_cell() {
        let grid = vec![BiomeId::PLAINS, BiomeId::OCEAN, BiomeId::PLAINS, BiomeId::RIVER];
        let a = grid_fingerprint(&grid, 2, 2);
        assert_eq!(a.histogram["plains"], 2);
        assert_eq!(a.blake3.len(), 64);

        let mut changed = grid.clone();
        changed[3] = BiomeId::BEACH;
        assert_ne!(a.blake3, grid_fingerprint(&changed, 2, 2).blake3);
        assert_eq!(a, grid_fingerprint(&grid, 2, 2));
    }

    #[test]
    fn stored_snapshot_matches_and_detects_changes() {
        let path = std::env::temp_dir()
            .join(format!("seedmap-snapshots-{}", std::process::id()))
            .join("grid.json");
        let grid = vec![BiomeId::DESERT; 4];
        let fingerprint = grid_fingerprint(&grid, 2, 2);
        write_snapshot(&path, &canonical_json(&fingerprint).unwrap()).unwrap();

        assert!(assert_json_snapshot(&path, &fingerprint).is_ok());
        if !should_update_snapshots() {
            let other = grid_fingerprint(&[BiomeId::PLAINS; 4], 2, 2);
            assert!(assert_json_snapshot(&path, &other).is_err());
            assert!(assert_json_snapshot(path.with_file_name("missing.json"), &other).is_err());
        }
    }

    #[test]
    fn canonical_json_sorts_keys() {
        let json = canonical_json(&serde_json::json!({"b": 1, "a": {"d": 2, "c": 3}})).unwrap();
        assert!(json.find("\"a\"").unwrap() < json.find("\"b\"").unwrap());
        assert!(json.find("\"c\"").unwrap() < json.find("\"d\"").unwrap());
        assert!(json.ends_with('\n'));
    }
}
