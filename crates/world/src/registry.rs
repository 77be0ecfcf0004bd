//! Decision trees available to modern generators, loaded once and shared.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use walkdir::WalkDir;

use seedmap_climate::{tree_name_for, DecisionTree, TreeError, TreePack};
use seedmap_core::McVersion;

/// Named decision trees.
#[derive(Debug, Clone, Default)]
pub struct TreeRegistry {
    trees: BTreeMap<String, Arc<DecisionTree>>,
}

impl TreeRegistry {
    /// Registry with no trees; only Beta and layer versions can be built.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register `tree` under `name`, replacing any previous tree.
    pub fn insert(&mut self, name: impl Into<String>, tree: DecisionTree) {
        self.trees.insert(name.into(), Arc::new(tree));
    }

    /// Tree registered as `name`.
    pub fn get(&self, name: &str) -> Option<Arc<DecisionTree>> {
        self.trees.get(name).cloned()
    }

    /// Tree used by `version`, if the version needs one and it is loaded.
    pub fn tree_for(&self, version: McVersion) -> Option<Arc<DecisionTree>> {
        tree_name_for(version).and_then(|name| self.get(name))
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trees.keys().map(String::as_str)
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.trees.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// Every tree in a pack file.
    pub fn from_pack(path: &Path) -> Result<Self, TreeError> {
        let pack = TreePack::read_from(path)?;
        let mut registry = Self::default();
        for (name, tree) in pack.trees {
            registry.insert(name, tree);
        }
        info!(path = %path.display(), trees = registry.len(), "loaded tree pack");
        Ok(registry)
    }

    /// Every `.json` and `.h` tree directly inside `dir`, named by file
    /// stem. Files that fail to parse are skipped with a warning; when a
    /// stem exists in both formats the JSON file wins.
    pub fn from_dir(dir: &Path) -> Result<Self, TreeError> {
        let mut registry = Self::default();
        let mut from_header = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| TreeError::Io {
                path: dir.to_path_buf(),
                source: e.into(),
            })?;
            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("json") | Some("h")) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match DecisionTree::load(path) {
                Ok(tree) if ext == Some("h") => from_header.push((name.to_string(), tree)),
                Ok(tree) => registry.insert(name, tree),
                Err(err) => warn!(path = %path.display(), %err, "skipping tree file"),
            }
        }
        for (name, tree) in from_header {
            registry.trees.entry(name).or_insert_with(|| Arc::new(tree));
        }
        info!(dir = %dir.display(), trees = registry.len(), "loaded tree directory");
        Ok(registry)
    }

    /// Load from a pack file or a directory of tree files.
    pub fn load(path: &Path) -> Result<Self, TreeError> {
        if path.is_dir() {
            Self::from_dir(path)
        } else {
            Self::from_pack(path)
        }
    }
}
