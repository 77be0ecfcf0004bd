//! Reference corpora: biomes recorded from the reference generator.
//!
//! Two formats are read. Ground-truth dumps hold one case per line as
//! whitespace-separated `version seed x z biome`, where `version` is either
//! a label such as `1.12` or the reference generator's numeric version code
//! and coordinates are 1:4 cells. JSONL files hold one [`ReferenceCase`] per
//! line.

use anyhow::{bail, Context, Result};
use seedmap_core::McVersion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One recorded biome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCase {
    /// Game version.
    pub version: McVersion,
    /// World seed as recorded (signed).
    pub seed: i64,
    /// Cell x at `scale`.
    pub x: i32,
    /// Height; 1:4 cells except at scale 1.
    #[serde(default)]
    pub y: i32,
    /// Cell z at `scale`.
    pub z: i32,
    /// Blocks per cell.
    #[serde(default = "default_scale")]
    pub scale: u32,
    /// Large-biome world type.
    #[serde(default)]
    pub large_biomes: bool,
    /// Biome id the reference generator produced.
    pub expected: i32,
}

fn default_scale() -> u32 {
    4
}

/// Version for the reference generator's numeric version code.
pub fn version_from_code(code: u32) -> Option<McVersion> {
    use McVersion as V;
    let v = match code {
        1 => V::B1_7,
        3 => V::V1_0,
        4 => V::V1_1,
        5 => V::V1_2,
        6 => V::V1_3,
        7 => V::V1_4,
        8 => V::V1_5,
        9 => V::V1_6,
        10 => V::V1_7,
        11 => V::V1_8,
        12 => V::V1_9,
        13 => V::V1_10,
        14 => V::V1_11,
        15 => V::V1_12,
        16 => V::V1_13,
        17 => V::V1_14,
        18 => V::V1_15,
        19 => V::V1_16_1,
        20 => V::V1_16,
        21 => V::V1_17,
        22 => V::V1_18,
        23 => V::V1_19_2,
        24 => V::V1_19,
        25 => V::V1_20,
        26 => V::V1_21_1,
        27 => V::V1_21_3,
        28 => V::V1_21_WD,
        _ => return None,
    };
    Some(v)
}

fn parse_version(token: &str) -> Result<McVersion> {
    if let Ok(code) = token.parse::<u32>() {
        return version_from_code(code).with_context(|| format!("unknown version code {code}"));
    }
    token
        .parse::<McVersion>()
        .with_context(|| format!("unknown version {token:?}"))
}

/// Parse one whitespace-separated ground-truth line. Blank lines and `#`
/// comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ReferenceCase>> {
    let line = line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}' || c == '\0');
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 5 {
        bail!("expected `version seed x z biome`, got {line:?}");
    }
    let seed = match fields[1].parse::<i64>() {
        Ok(s) => s,
        // Unsigned dumps wrap into the signed range.
        Err(_) => fields[1]
            .parse::<u64>()
            .with_context(|| format!("bad seed {:?}", fields[1]))? as i64,
    };
    Ok(Some(ReferenceCase {
        version: parse_version(fields[0])?,
        seed,
        x: fields[2].parse().with_context(|| format!("bad x {:?}", fields[2]))?,
        y: 0,
        z: fields[3].parse().with_context(|| format!("bad z {:?}", fields[3]))?,
        scale: 4,
        large_biomes: false,
        expected: fields[4]
            .parse()
            .with_context(|| format!("bad biome {:?}", fields[4]))?,
    }))
}

/// Decode a corpus file, accepting UTF-8 or UTF-16LE with byte order mark.
fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read corpus {}", path.display()))?;
    if let [0xFF, 0xFE, rest @ ..] = bytes.as_slice() {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .collect();
        return Ok(String::from_utf16_lossy(&units));
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Load every case in a corpus file. `.jsonl` files are read as JSON lines,
/// anything else as a ground-truth dump. Lines naming versions without a
/// generator (such as Beta 1.8) are skipped when `skip_unknown` is set.
pub fn load_corpus<P: AsRef<Path>>(path: P, skip_unknown: bool) -> Result<Vec<ReferenceCase>> {
    let path = path.as_ref();
    let text = read_text(path)?;
    let jsonl = path.extension().and_then(|e| e.to_str()) == Some("jsonl");

    let mut cases = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let parsed = if jsonl {
            if line.trim().is_empty() {
                continue;
            }
            serde_json::from_str::<ReferenceCase>(line)
                .map(Some)
                .map_err(anyhow::Error::from)
        } else {
            parse_line(line)
        };
        match parsed {
            Ok(Some(case)) => cases.push(case),
            Ok(None) => {}
            Err(err) if skip_unknown => {
                tracing::debug!(line = n + 1, %err, "skipping corpus line");
            }
            Err(err) => {
                return Err(err.context(format!("{}:{}", path.display(), n + 1)));
            }
        }
    }
    Ok(cases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_labelled_versions() {
        let a = parse_line("15 111 25 -12 6").unwrap().unwrap();
        assert_eq!(a.version, McVersion::V1_12);
        assert_eq!((a.seed, a.x, a.z, a.expected), (111, 25, -12, 6));
        assert_eq!(a.scale, 4);

        let b = parse_line("1.18 -5 0 0 1").unwrap().unwrap();
        assert_eq!(b.version, McVersion::V1_18);
        assert_eq!(b.seed, -5);
    }

    #[test]
    fn unsigned_seeds_wrap() {
        let c = parse_line("15 18446744073709551615 0 0 0").unwrap().unwrap();
        assert_eq!(c.seed, -1);
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert!(parse_line("   ").unwrap().is_none());
        assert!(parse_line("# version seed x z biome").unwrap().is_none());
    }

    #[test]
    fn beta_1_8_has_no_version() {
        assert!(parse_line("2 1 0 0 1").is_err());
        assert!(parse_line("15 1 0").is_err());
    }

    #[test]
    fn loads_utf16_dumps_and_jsonl() {
        let dir = std::env::temp_dir();
        let dump = dir.join(format!("corpus-{}.txt", std::process::id()));
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "15 1 0 0 4\r\n2 1 0 0 1\r\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&dump, bytes).unwrap();
        let cases = load_corpus(&dump, true).unwrap();
        assert_eq!(cases.len(), 1);
        assert!(load_corpus(&dump, false).is_err());

        let jsonl = dir.join(format!("corpus-{}.jsonl", std::process::id()));
        let line = serde_json::to_string(&cases[0]).unwrap();
        fs::write(&jsonl, format!("{line}\n\n")).unwrap();
        assert_eq!(load_corpus(&jsonl, false).unwrap(), cases);
    }
}
