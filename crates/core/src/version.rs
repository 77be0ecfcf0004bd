//! Game version eras.
//!
//! Only the versions whose generators differ are distinguished; a patch
//! release maps onto the era that introduced its biome logic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::GenError;

/// A supported game version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum McVersion {
    /// Beta 1.7 climate generator.
    #[serde(rename = "b1.7")]
    B1_7,
    #[allow(missing_docs)]
    #[serde(rename = "1.0")]
    V1_0,
    #[allow(missing_docs)]
    #[serde(rename = "1.1")]
    V1_1,
    #[allow(missing_docs)]
    #[serde(rename = "1.2")]
    V1_2,
    #[allow(missing_docs)]
    #[serde(rename = "1.3")]
    V1_3,
    #[allow(missing_docs)]
    #[serde(rename = "1.4")]
    V1_4,
    #[allow(missing_docs)]
    #[serde(rename = "1.5")]
    V1_5,
    #[allow(missing_docs)]
    #[serde(rename = "1.6")]
    V1_6,
    #[allow(missing_docs)]
    #[serde(rename = "1.7")]
    V1_7,
    #[allow(missing_docs)]
    #[serde(rename = "1.8")]
    V1_8,
    #[allow(missing_docs)]
    #[serde(rename = "1.9")]
    V1_9,
    #[allow(missing_docs)]
    #[serde(rename = "1.10")]
    V1_10,
    #[allow(missing_docs)]
    #[serde(rename = "1.11")]
    V1_11,
    #[allow(missing_docs)]
    #[serde(rename = "1.12")]
    V1_12,
    #[allow(missing_docs)]
    #[serde(rename = "1.13")]
    V1_13,
    #[allow(missing_docs)]
    #[serde(rename = "1.14")]
    V1_14,
    #[allow(missing_docs)]
    #[serde(rename = "1.15")]
    V1_15,
    #[allow(missing_docs)]
    #[serde(rename = "1.16.1")]
    V1_16_1,
    #[allow(missing_docs)]
    #[serde(rename = "1.16")]
    V1_16,
    #[allow(missing_docs)]
    #[serde(rename = "1.17")]
    V1_17,
    /// First climate/decision-tree release.
    #[serde(rename = "1.18")]
    V1_18,
    #[allow(missing_docs)]
    #[serde(rename = "1.19.2")]
    V1_19_2,
    /// 1.19.3 and 1.19.4.
    #[serde(rename = "1.19")]
    V1_19,
    #[allow(missing_docs)]
    #[serde(rename = "1.20")]
    V1_20,
    #[allow(missing_docs)]
    #[serde(rename = "1.21.1")]
    V1_21_1,
    #[allow(missing_docs)]
    #[serde(rename = "1.21.3")]
    V1_21_3,
    /// 1.21 winter drop (pale garden).
    #[serde(rename = "1.21wd")]
    V1_21_WD,
}

/// Which engine a version runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Era {
    /// Simplex climate plus terrain-noise ocean test.
    Beta,
    /// Layer pipeline (1.0 to 1.17).
    Legacy,
    /// Climate noise plus decision tree (1.18 onwards).
    Modern,
}

impl McVersion {
    /// Every supported version, oldest first.
    pub const ALL: &'static [McVersion] = &[
        Self::B1_7,
        Self::V1_0,
        Self::V1_1,
        Self::V1_2,
        Self::V1_3,
        Self::V1_4,
        Self::V1_5,
        Self::V1_6,
        Self::V1_7,
        Self::V1_8,
        Self::V1_9,
        Self::V1_10,
        Self::V1_11,
        Self::V1_12,
        Self::V1_13,
        Self::V1_14,
        Self::V1_15,
        Self::V1_16_1,
        Self::V1_16,
        Self::V1_17,
        Self::V1_18,
        Self::V1_19_2,
        Self::V1_19,
        Self::V1_20,
        Self::V1_21_1,
        Self::V1_21_3,
        Self::V1_21_WD,
    ];

    /// Engine family.
    pub fn era(self) -> Era {
        if self == Self::B1_7 {
            Era::Beta
        } else if self <= Self::V1_17 {
            Era::Legacy
        } else {
            Era::Modern
        }
    }

    /// Canonical label, also accepted by [`FromStr`].
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::B1_7 => "b1.7",
            Self::V1_0 => "1.0",
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
            Self::V1_3 => "1.3",
            Self::V1_4 => "1.4",
            Self::V1_5 => "1.5",
            Self::V1_6 => "1.6",
            Self::V1_7 => "1.7",
            Self::V1_8 => "1.8",
            Self::V1_9 => "1.9",
            Self::V1_10 => "1.10",
            Self::V1_11 => "1.11",
            Self::V1_12 => "1.12",
            Self::V1_13 => "1.13",
            Self::V1_14 => "1.14",
            Self::V1_15 => "1.15",
            Self::V1_16_1 => "1.16.1",
            Self::V1_16 => "1.16",
            Self::V1_17 => "1.17",
            Self::V1_18 => "1.18",
            Self::V1_19_2 => "1.19.2",
            Self::V1_19 => "1.19",
            Self::V1_20 => "1.20",
            Self::V1_21_1 => "1.21.1",
            Self::V1_21_3 => "1.21.3",
            Self::V1_21_WD => "1.21wd",
        }
    }

    /// Whether large-biome worlds exist in this version.
    pub fn supports_large_biomes(self) -> bool {
        self >= Self::V1_3
    }
}

impl fmt::Display for McVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for McVersion {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        let s = s.strip_prefix("mc_").unwrap_or(&s).replace('_', ".");
        let aliased = match s.as_str() {
            "beta1.7" | "b1.7.3" => "b1.7",
            "1.2.5" => "1.2",
            "1.7.10" => "1.7",
            "1.8.9" => "1.8",
            "1.12.2" => "1.12",
            "1.16.5" => "1.16",
            "1.17.1" => "1.17",
            "1.18.2" => "1.18",
            "1.19.3" | "1.19.4" => "1.19",
            "1.20.6" => "1.20",
            "1.21" => "1.21.1",
            "1.21.2" => "1.21.3",
            "1.21.4" | "1.21.wd" => "1.21wd",
            other => other,
        };
        McVersion::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == aliased)
            .ok_or_else(|| GenError::UnsupportedVersion(s.to_string()))
    }
}
