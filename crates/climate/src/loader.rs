//! Tree ingestion: JSON documents, the C header tables the trees are
//! published as, and `.stp` packs bundling several trees.
//!
//! A pack is a 14-byte header (magic, version, CRC32 of the payload,
//! payload length; all little endian) followed by a zstd-compressed bincode
//! map from tree name to tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::tree::{DecisionTree, DEFAULT_ORDER};

/// "SMTP": seedmap tree pack.
const PACK_MAGIC: u32 = 0x534D5450;

const PACK_VERSION: u16 = 1;

const HEADER_LEN: usize = 14;

/// JSON shape of a tree. Nodes are hex strings since they exceed the
/// integer range many JSON tools preserve.
#[derive(Serialize, Deserialize)]
struct TreeDoc {
    #[serde(default = "default_order")]
    order: u32,
    steps: Vec<u32>,
    params: Vec<[i32; 2]>,
    nodes: Vec<String>,
}

fn default_order() -> u32 {
    DEFAULT_ORDER
}

fn parse_hex(s: &str) -> Option<u64> {
    let digits = s
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .trim_end_matches(['u', 'U', 'l', 'L']);
    u64::from_str_radix(digits, 16).ok()
}

fn read(path: &Path) -> Result<Vec<u8>, TreeError> {
    fs::read(path).map_err(|source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), TreeError> {
    fs::write(path, bytes).map_err(|source| TreeError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl DecisionTree {
    /// Parse a JSON tree document.
    pub fn from_json(text: &str) -> Result<Self, TreeError> {
        let doc: TreeDoc = serde_json::from_str(text)?;
        let nodes = doc
            .nodes
            .iter()
            .enumerate()
            .map(|(i, s)| {
                parse_hex(s).ok_or_else(|| TreeError::Shape(format!("node {i} is not hex: {s:?}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        DecisionTree::new(doc.order, doc.steps, doc.params, nodes)
    }

    /// Render as a JSON tree document.
    pub fn to_json(&self) -> Result<String, TreeError> {
        let doc = TreeDoc {
            order: self.order(),
            steps: self.steps().to_vec(),
            params: self.params().to_vec(),
            nodes: self.nodes().iter().map(|n| format!("0x{n:016x}")).collect(),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Parse the `btreeNN_steps`, `btreeNN_param` and `btreeNN_nodes` arrays
    /// (and `btreeNN_order`, when present) out of C header text.
    pub fn from_c_header(text: &str) -> Result<Self, TreeError> {
        let text = strip_comments(text);
        let order = match text.find("_order") {
            Some(at) => parse_order(&text[at..])?,
            None => DEFAULT_ORDER,
        };

        let steps = literals(array_body(&text, "_steps[")?)?
            .into_iter()
            .map(|v| u32::try_from(v).map_err(|_| TreeError::Header(format!("step {v} out of range"))))
            .collect::<Result<Vec<_>, _>>()?;

        let flat = literals(array_body(&text, "_param[")?)?;
        if flat.len() % 2 != 0 {
            return Err(TreeError::Header("odd number of parameter bounds".into()));
        }
        let params = flat
            .chunks_exact(2)
            .map(|pair| -> Result<[i32; 2], TreeError> {
                let bound = |v: i128| {
                    i32::try_from(v).map_err(|_| TreeError::Header(format!("bound {v} out of range")))
                };
                Ok([bound(pair[0])?, bound(pair[1])?])
            })
            .collect::<Result<Vec<_>, _>>()?;

        let nodes = literals(array_body(&text, "_nodes[")?)?
            .into_iter()
            .map(|v| u64::try_from(v).map_err(|_| TreeError::Header(format!("node {v} out of range"))))
            .collect::<Result<Vec<_>, _>>()?;

        DecisionTree::new(order, steps, params, nodes)
    }

    /// Load a `.json` or `.h` tree file.
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        let parse: fn(&str) -> Result<Self, TreeError> = match ext {
            "json" => DecisionTree::from_json,
            "h" => DecisionTree::from_c_header,
            _ => return Err(TreeError::UnknownFormat(path.to_path_buf())),
        };
        let bytes = read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        parse(&text)
    }
}

/// Value of `btreeNN_order = N`, declared either as an enum constant
/// (`enum { btree18_order = 10 };`) or as a plain initialized variable.
fn parse_order(decl: &str) -> Result<u32, TreeError> {
    let (_, value) = decl
        .split_once('=')
        .ok_or_else(|| TreeError::Header("order has no value".into()))?;
    let value = value
        .split(['}', ';', ','])
        .next()
        .unwrap_or_default()
        .trim();
    value
        .trim_end_matches(['u', 'U'])
        .parse()
        .map_err(|_| TreeError::Header(format!("bad order {value:?}")))
}

fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    loop {
        let line = rest.find("//");
        let block = rest.find("/*");
        let (at, end) = match (line, block) {
            (Some(l), Some(b)) if b < l => (b, "*/"),
            (Some(l), _) => (l, "\n"),
            (None, Some(b)) => (b, "*/"),
            (None, None) => break,
        };
        out.push_str(&rest[..at]);
        rest = &rest[at..];
        match rest.find(end) {
            Some(close) if end == "\n" => rest = &rest[close..],
            Some(close) => rest = &rest[close + end.len()..],
            None => {
                rest = "";
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Text between the initializer braces of the array declared by `marker`.
fn array_body<'a>(text: &'a str, marker: &str) -> Result<&'a str, TreeError> {
    let missing = || TreeError::Header(format!("no array matching `{marker}`"));
    let decl = text.find(marker).ok_or_else(missing)?;
    let rest = &text[decl..];
    let open = rest.find('{').ok_or_else(missing)?;
    let close = rest.find("};").ok_or_else(missing)?;
    if close < open {
        return Err(missing());
    }
    Ok(&rest[open + 1..close])
}

/// Integer literals in an initializer, decimal or hex, with C suffixes.
fn literals(body: &str) -> Result<Vec<i128>, TreeError> {
    body.split(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            let bad = || TreeError::Header(format!("bad literal {tok:?}"));
            let lower = tok.to_ascii_lowercase();
            if lower.starts_with("0x") {
                parse_hex(&lower).map(i128::from).ok_or_else(bad)
            } else {
                lower
                    .trim_end_matches(['u', 'l'])
                    .parse::<i128>()
                    .map_err(|_| bad())
            }
        })
        .collect()
}

/// Named trees bundled in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreePack {
    /// Trees keyed by name (`btree18`, `btree20`, ...).
    pub trees: BTreeMap<String, DecisionTree>,
}

impl TreePack {
    /// Add or replace a tree.
    pub fn insert(&mut self, name: impl Into<String>, tree: DecisionTree) {
        self.trees.insert(name.into(), tree);
    }

    /// Encode with header, compression and checksum.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TreeError> {
        let serialized = bincode::serialize(self)?;
        let compressed = zstd::encode_all(&serialized[..], 3)
            .map_err(|e| TreeError::Encoding(format!("compression failed: {e}")))?;
        let payload_len = u32::try_from(compressed.len())
            .map_err(|_| TreeError::Encoding("payload exceeds 4 GiB".into()))?;

        let mut hasher = Hasher::new();
        hasher.update(&compressed);
        let crc32 = hasher.finalize();

        let mut bytes = Vec::with_capacity(HEADER_LEN + compressed.len());
        bytes.extend_from_slice(&PACK_MAGIC.to_le_bytes());
        bytes.extend_from_slice(&PACK_VERSION.to_le_bytes());
        bytes.extend_from_slice(&crc32.to_le_bytes());
        bytes.extend_from_slice(&payload_len.to_le_bytes());
        bytes.extend_from_slice(&compressed);
        Ok(bytes)
    }

    /// Decode bytes written by [`TreePack::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TreeError> {
        if bytes.len() < HEADER_LEN {
            return Err(TreeError::Pack("header too short".into()));
        }
        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != PACK_MAGIC {
            return Err(TreeError::Pack(format!(
                "expected magic 0x{PACK_MAGIC:08X}, got 0x{magic:08X}"
            )));
        }
        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != PACK_VERSION {
            return Err(TreeError::Pack(format!("unsupported version {version}")));
        }
        let crc32 = u32::from_le_bytes([bytes[6], bytes[7], bytes[8], bytes[9]]);
        let payload_len = u32::from_le_bytes([bytes[10], bytes[11], bytes[12], bytes[13]]) as usize;

        let compressed = bytes
            .get(HEADER_LEN..HEADER_LEN + payload_len)
            .ok_or_else(|| TreeError::Pack("payload truncated".into()))?;

        let mut hasher = Hasher::new();
        hasher.update(compressed);
        let actual = hasher.finalize();
        if actual != crc32 {
            return Err(TreeError::Checksum {
                expected: crc32,
                actual,
            });
        }

        let decompressed = zstd::decode_all(compressed)
            .map_err(|e| TreeError::Encoding(format!("decompression failed: {e}")))?;
        let pack: TreePack = bincode::deserialize(&decompressed)?;
        // Deserialization bypasses the shape checks in `DecisionTree::new`.
        for (name, tree) in &pack.trees {
            DecisionTree::new(
                tree.order(),
                tree.steps().to_vec(),
                tree.params().to_vec(),
                tree.nodes().to_vec(),
            )
            .map_err(|e| TreeError::Shape(format!("{name}: {e}")))?;
        }
        Ok(pack)
    }

    /// Read a pack file.
    pub fn read_from(path: &Path) -> Result<Self, TreeError> {
        Self::from_bytes(&read(path)?)
    }

    /// Write a pack file.
    pub fn write_to(&self, path: &Path) -> Result<(), TreeError> {
        write(path, &self.to_bytes()?)
    }
}
