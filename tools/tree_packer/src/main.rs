use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use seedmap_climate::{DecisionTree, TreePack};
use serde::Serialize;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Biome decision tree conversion utility for seedmap", long_about = None)]
struct Args {
    /// Directory containing tree sources (`btree*.h` headers or JSON)
    #[arg(short, long)]
    input: PathBuf,

    /// Directory to write one JSON file per tree into
    #[arg(long)]
    json_dir: Option<PathBuf>,

    /// Pack file bundling every tree
    #[arg(long)]
    pack: Option<PathBuf>,

    /// Summary JSON path
    #[arg(long, default_value = "trees.json")]
    output_meta: PathBuf,

    /// Only convert these tree names (file stems); all by default
    #[arg(long = "name")]
    names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct PackMetadata {
    trees: Vec<TreeEntry>,
}

#[derive(Debug, Serialize)]
struct TreeEntry {
    name: String,
    source: String,
    order: u32,
    nodes: usize,
    params: usize,
    depth: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run(args)
}

fn run(args: Args) -> Result<()> {
    if !args.input.is_dir() {
        bail!("Input path {:?} is not a directory", args.input);
    }
    if args.json_dir.is_none() && args.pack.is_none() {
        bail!("Nothing to write: pass --json-dir and/or --pack");
    }
    let trees = load_trees(&args)?;
    if trees.is_empty() {
        bail!("No trees found in {}", args.input.display());
    }

    if let Some(dir) = &args.json_dir {
        fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {dir:?}"))?;
        for (name, (_, tree)) in &trees {
            let path = dir.join(format!("{name}.json"));
            fs::write(&path, tree.to_json()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
    }

    if let Some(path) = &args.pack {
        ensure_parent(path)?;
        let mut pack = TreePack::default();
        for (name, (_, tree)) in &trees {
            pack.insert(name.clone(), tree.clone());
        }
        pack.write_to(path)
            .with_context(|| format!("Failed to write pack to {}", path.display()))?;
    }

    ensure_parent(&args.output_meta)?;
    let metadata = PackMetadata {
        trees: trees
            .iter()
            .map(|(name, (source, tree))| TreeEntry {
                name: name.clone(),
                source: source.display().to_string(),
                order: tree.order(),
                nodes: tree.nodes().len(),
                params: tree.params().len(),
                depth: tree.steps().len(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&metadata)?;
    fs::write(&args.output_meta, json)
        .with_context(|| format!("Failed to write metadata to {}", args.output_meta.display()))?;

    println!(
        "Converted {} trees ({})",
        trees.len(),
        trees.keys().cloned().collect::<Vec<_>>().join(", ")
    );
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {parent:?}"))?;
        }
    }
    Ok(())
}

/// Trees keyed by file stem. A JSON file replaces a header of the same name.
fn load_trees(args: &Args) -> Result<BTreeMap<String, (PathBuf, DecisionTree)>> {
    let mut paths: Vec<PathBuf> = WalkDir::new(&args.input)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| matches!(path.extension().and_then(|e| e.to_str()), Some("h" | "json")))
        .collect();
    // Headers sort before JSON so JSON wins on duplicate stems.
    paths.sort_by_key(|p| (p.extension().map(|e| e != "h"), p.clone()));

    let mut trees = BTreeMap::new();
    for path in paths {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        if !args.names.is_empty() && !args.names.contains(&name) {
            continue;
        }
        let tree = DecisionTree::load(&path)
            .with_context(|| format!("Failed to convert {}", path.display()))?;
        trees.insert(name, (path, tree));
    }
    Ok(trees)
}
