//! seedmap - biome lookup for any seed and game version
//!
//! Query executable over the seedmap generators

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use commands::Query;
use config::{SeedmapConfig, DEFAULT_CONFIG_PATH};
use seedmap_core::McVersion;
use seedmap_world::{GeneratorCache, GeneratorOptions, TreeRegistry};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Biome lookup for any seed and game version", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Tree directory or pack; overrides the config file
    #[arg(long)]
    trees: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct WorldArgs {
    /// World seed: an integer, or text hashed the way the game does
    #[arg(long, allow_hyphen_values = true)]
    seed: String,

    /// Game version, e.g. `1.12`, `1.18`, `b1.7`
    #[arg(long)]
    mc: Option<McVersion>,

    /// Large-biome world type
    #[arg(long)]
    large_biomes: bool,

    /// Blocks per cell
    #[arg(long)]
    scale: Option<u32>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Biome of a single cell
    Biome {
        #[command(flatten)]
        world: WorldArgs,
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        z: i32,
        /// Height; only used from 1.18
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        y: i32,
    },
    /// Biomes of a rectangle of cells
    Area {
        #[command(flatten)]
        world: WorldArgs,
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        z: i32,
        #[arg(long, default_value_t = 16)]
        width: usize,
        #[arg(long, default_value_t = 16)]
        height: usize,
        #[arg(long, allow_hyphen_values = true, default_value_t = 0)]
        y: i32,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Supported versions and their engines
    Versions,
    /// Print the effective configuration, optionally saving it
    Config {
        #[arg(long)]
        write: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    // WARN by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = SeedmapConfig::load_from_path(&cli.config);
    if cli.trees.is_some() {
        config.trees = cli.trees.clone();
    }
    info!("Starting seedmap v{}", env!("CARGO_PKG_VERSION"));

    let trees = match &config.trees {
        Some(path) => TreeRegistry::load(path)
            .with_context(|| format!("failed to load trees from {}", path.display()))?,
        None => TreeRegistry::empty(),
    };

    match cli.command {
        Command::Biome { world, x, z, y } => {
            let cache = GeneratorCache::new(Arc::new(trees), config.cache_capacity);
            let q = query(&world, &config)?;
            let id = commands::biome(&cache, &q, x, y, z)?;
            println!("{} {id}", id.0);
        }
        Command::Area {
            world,
            x,
            z,
            width,
            height,
            y,
            format,
        } => {
            let cache = GeneratorCache::new(Arc::new(trees), config.cache_capacity);
            let q = query(&world, &config)?;
            let report = commands::area(&cache, &q, x, z, width, height, y)?;
            match format {
                Format::Text => print!("{}", report.to_text()),
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Command::Versions => print!("{}", commands::versions_table(&trees)),
        Command::Config { write } => {
            if let Some(path) = write {
                config.save_to_path(&path)?;
                info!(path = %path.display(), "saved configuration");
            }
            print!("{}", toml::to_string_pretty(&config)?);
        }
    }
    Ok(())
}

fn query(world: &WorldArgs, config: &SeedmapConfig) -> Result<Query> {
    Ok(Query {
        version: world.mc.unwrap_or(config.version),
        options: GeneratorOptions {
            large_biomes: world.large_biomes || config.large_biomes,
        },
        seed: commands::parse_seed(&world.seed)?,
        scale: world.scale.unwrap_or(config.scale),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "seedmap", "biome", "--seed", "-5", "--mc", "1.7", "--scale", "16", "--x", "-3", "--z",
            "4",
        ])
        .unwrap();
        let Command::Biome { world, x, z, y } = cli.command else {
            panic!("expected biome");
        };
        assert_eq!((x, z, y), (-3, 4, 0));
        let q = query(&world, &SeedmapConfig::default()).unwrap();
        assert_eq!(q.version, McVersion::V1_7);
        assert_eq!(q.scale, 16);
        assert_eq!(q.seed, (-5i64) as u64);
        assert!(!q.options.large_biomes);
    }

    #[test]
    fn config_supplies_missing_flags() {
        let cli = Cli::try_parse_from(["seedmap", "area", "--seed", "1", "--x", "0", "--z", "0"])
            .unwrap();
        let Command::Area { world, width, .. } = cli.command else {
            panic!("expected area");
        };
        assert_eq!(width, 16);
        let config = SeedmapConfig {
            version: McVersion::V1_16,
            large_biomes: true,
            ..SeedmapConfig::default()
        };
        let q = query(&world, &config).unwrap();
        assert_eq!(q.version, McVersion::V1_16);
        assert!(q.options.large_biomes);
    }

    #[test]
    fn rejects_unknown_versions() {
        assert!(Cli::try_parse_from(["seedmap", "biome", "--seed", "1", "--mc", "b1.8", "--x", "0", "--z", "0"]).is_err());
    }
}
