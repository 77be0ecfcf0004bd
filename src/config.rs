use anyhow::Result;
use seedmap_core::McVersion;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/seedmap.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SeedmapConfig {
    /// Tree directory or pack for modern versions, relative to the
    /// working directory.
    pub trees: Option<PathBuf>,
    /// Seeded generators kept between queries.
    pub cache_capacity: usize,
    pub version: McVersion,
    pub large_biomes: bool,
    /// Blocks per cell.
    pub scale: u32,
}

impl Default for SeedmapConfig {
    fn default() -> Self {
        Self {
            trees: None,
            cache_capacity: 16,
            version: McVersion::V1_18,
            large_biomes: false,
            scale: 4,
        }
    }
}

impl SeedmapConfig {
    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<SeedmapConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    SeedmapConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_CONFIG_PATH)
                    || err.kind() != std::io::ErrorKind::NotFound
                {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                }
                SeedmapConfig::default()
            }
        }
    }

    /// Save configuration to an explicit path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}
