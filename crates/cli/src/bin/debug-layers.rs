//! Debug Layers Tool
//!
//! Dumps the intermediate grids of a layer-era stack so a divergence from
//! reference output can be traced to the first layer that differs.
//!
//! Usage:
//!   debug-layers --version 1.12 --seed 111 --region -64,-64,64,64
//!   debug-layers --version 1.7 --seed 5 --large --layer river_mix
//!   debug-layers --version 1.16 --seed 1 --output target/layers.txt

use anyhow::{bail, Context, Result};
use seedmap_core::McVersion;
use seedmap_layers::LayerStack;
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Config {
    version: McVersion,
    seed: u64,
    large_biomes: bool,
    /// Block-coordinate rectangle `min_x, min_z, max_x, max_z` (inclusive).
    region: (i32, i32, i32, i32),
    layer: Option<String>,
    output: Option<PathBuf>,
}

fn parse_args<I>(mut args: I) -> Result<Config>
where
    I: Iterator<Item = String>,
{
    let mut version = McVersion::V1_12;
    let mut seed = 0u64;
    let mut large_biomes = false;
    let mut region = (-64, -64, 63, 63);
    let mut layer = None;
    let mut output = None;

    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .with_context(|| format!("{name} requires an argument"))
        };
        match arg.as_str() {
            "--version" => version = value("--version")?.parse()?,
            "--seed" => {
                let raw = value("--seed")?;
                seed = match raw.parse::<i64>() {
                    Ok(s) => s as u64,
                    Err(_) => raw.parse().with_context(|| format!("invalid seed {raw:?}"))?,
                };
            }
            "--large" => large_biomes = true,
            "--region" => {
                let raw = value("--region")?;
                let parts = raw
                    .split(',')
                    .map(|p| p.trim().parse::<i32>())
                    .collect::<Result<Vec<_>, _>>()
                    .with_context(|| format!("invalid region {raw:?}"))?;
                let [min_x, min_z, max_x, max_z] = parts[..] else {
                    bail!("--region format: min_x,min_z,max_x,max_z");
                };
                if max_x < min_x || max_z < min_z {
                    bail!("--region is empty");
                }
                region = (min_x, min_z, max_x, max_z);
            }
            "--layer" => layer = Some(value("--layer")?),
            "--output" | "-o" => output = Some(PathBuf::from(value("--output")?)),
            other => bail!("unknown option {other:?}"),
        }
    }

    Ok(Config {
        version,
        seed,
        large_biomes,
        region,
        layer,
        output,
    })
}

/// Write every layer (or the one named) over the region, coarsest first.
fn dump(config: &Config, out: &mut dyn Write) -> Result<()> {
    let stack = LayerStack::with_seed(config.version, config.large_biomes, config.seed)?;
    let (min_x, min_z, max_x, max_z) = config.region;
    writeln!(
        out,
        "# {} seed {} large_biomes {} region {min_x},{min_z}..{max_x},{max_z}",
        config.version, config.seed, config.large_biomes
    )?;

    let mut shown = 0;
    for (index, layer) in stack.layers().enumerate() {
        if config.layer.as_deref().is_some_and(|name| name != layer.name()) {
            continue;
        }
        let scale = layer.scale() as i32;
        let x = min_x.div_euclid(scale);
        let z = min_z.div_euclid(scale);
        let w = (max_x.div_euclid(scale) - x + 1) as usize;
        let h = (max_z.div_euclid(scale) - z + 1) as usize;
        let grid = layer.generate(x, z, w, h);

        writeln!(
            out,
            "\n[{index}] {} 1:{} salt {} cells {w}x{h} from ({x}, {z})",
            layer.name(),
            layer.scale(),
            layer.salt()
        )?;
        for row in grid.chunks(w) {
            let line: Vec<String> = row.iter().map(|v| format!("{v:>3}")).collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        shown += 1;
    }
    if shown == 0 {
        bail!(
            "no layer named {:?} in the {} stack",
            config.layer.as_deref().unwrap_or(""),
            config.version
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .try_init();
    let config = parse_args(env::args().skip(1))?;
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            let mut out = BufWriter::new(file);
            dump(&config, &mut out)?;
            out.flush()?;
            tracing::info!(path = %path.display(), "wrote layer dump");
        }
        None => dump(&config, &mut io::stdout().lock())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_region_and_negative_seed() {
        let config = parse_args(args(&["--seed", "-1", "--region", "0,0,15,31", "--version", "1.7"]))
            .expect("config");
        assert_eq!(config.seed, u64::MAX);
        assert_eq!(config.region, (0, 0, 15, 31));
        assert_eq!(config.version, McVersion::V1_7);
    }

    #[test]
    fn rejects_bad_regions_and_versions() {
        assert!(parse_args(args(&["--region", "0,0,1"])).is_err());
        assert!(parse_args(args(&["--region", "5,0,1,1"])).is_err());
        assert!(parse_args(args(&["--version", "b1.8"])).is_err());
    }

    #[test]
    fn dumps_a_single_named_layer() {
        let config = parse_args(args(&["--layer", "continent", "--region", "0,0,8191,8191"])).unwrap();
        let mut out = Vec::new();
        dump(&config, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("] continent 1:").count(), 1);
    }

    #[test]
    fn unknown_layer_names_fail() {
        let config = parse_args(args(&["--layer", "nope"])).unwrap();
        assert!(dump(&config, &mut Vec::new()).is_err());
    }
}
