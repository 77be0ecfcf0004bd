//! Version stacks as data, and the seeded graphs built from them.
//!
//! A stack is a list of [`LayerSpec`]s in dependency order; every spec names
//! its parents by index. [`LayerStack`] validates the list once and then
//! instantiates it for any world seed.

use std::sync::Arc;

use seedmap_core::{BiomeId, Era, GenError, McVersion};
use tracing::{debug, instrument};

use crate::layer::{Inputs, Layer, Transform};

/// Scales callers may enter a legacy stack at.
pub const ENTRY_SCALES: [u32; 5] = [1, 4, 16, 64, 256];

/// One node of a stack description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSpec {
    /// Transform applied by the node.
    pub transform: Transform,
    /// Base salt.
    pub salt: u64,
    /// Indices of earlier specs feeding this one, main parent first.
    pub parents: [Option<usize>; 2],
    /// Blocks per cell of a source layer. Derived from the main parent
    /// otherwise.
    pub source_scale: u32,
}

#[derive(Default)]
struct StackBuilder {
    specs: Vec<LayerSpec>,
}

impl StackBuilder {
    fn add(&mut self, transform: Transform, salt: u64, parents: [Option<usize>; 2], scale: u32) -> usize {
        self.specs.push(LayerSpec {
            transform,
            salt,
            parents,
            source_scale: scale,
        });
        self.specs.len() - 1
    }

    fn source(&mut self, transform: Transform, salt: u64, scale: u32) -> usize {
        self.add(transform, salt, [None, None], scale)
    }

    fn then(&mut self, transform: Transform, salt: u64, parent: usize) -> usize {
        self.add(transform, salt, [Some(parent), None], 0)
    }

    fn mix(&mut self, transform: Transform, salt: u64, main: usize, other: usize) -> usize {
        self.add(transform, salt, [Some(main), Some(other)], 0)
    }

    /// Chain of `count` zooms salted `first`, `first + 1`, ...
    fn zooms(&mut self, mut parent: usize, first: u64, count: u64) -> usize {
        for salt in first..first + count {
            parent = self.then(Transform::Zoom, salt, parent);
        }
        parent
    }

    /// Continent and coastline shaping shared by every legacy version, up
    /// to the first climate layer.
    fn continents(&mut self, large_biomes: bool) -> usize {
        use Transform as T;
        let scale = if large_biomes { 16384 } else { 4096 };
        let mut top = self.source(T::Continent, 1, scale);
        top = self.then(T::ZoomFuzzy, 2000, top);
        top = self.then(T::Land, 1, top);
        top = self.then(T::Zoom, 2001, top);
        self.then(T::Land, 2, top)
    }

    fn finish(self) -> Vec<LayerSpec> {
        self.specs
    }
}

/// Layers of the 1.0 to 1.6 generator.
fn early_stack(version: McVersion, large_biomes: bool) -> Vec<LayerSpec> {
    use Transform as T;
    let mut b = StackBuilder::default();
    let zoom_rounds = if large_biomes { 6 } else { 4 };

    let mut top = b.continents(large_biomes);
    top = b.then(T::Snow, 2, top);
    top = b.then(T::Zoom, 2002, top);
    top = b.then(T::Land, 3, top);
    top = b.then(T::Zoom, 2003, top);
    top = b.then(T::Land, 4, top);
    let mushroom = b.then(T::Mushroom, 5, top);

    let mut rivers = b.then(T::RiverInit, 100, mushroom);
    rivers = b.zooms(rivers, 1000, zoom_rounds + 2);
    rivers = b.then(T::River, 1, rivers);
    rivers = b.then(T::Smooth, 1000, rivers);

    let mut biomes = b.then(T::Biome, 200, mushroom);
    biomes = b.zooms(biomes, 1000, 2);
    if version >= McVersion::V1_1 {
        biomes = b.then(T::Hills, 1000, biomes);
    }
    for k in 0..zoom_rounds {
        biomes = b.then(T::Zoom, 1000 + k, biomes);
        if k == 0 {
            biomes = b.then(T::Land, 3, biomes);
        }
        if k == 1 {
            biomes = b.then(T::Shore, 1000, biomes);
            biomes = b.then(T::SwampRiver, 1000, biomes);
        }
    }
    biomes = b.then(T::Smooth, 1000, biomes);

    let out = b.mix(T::RiverMix, 100, biomes, rivers);
    b.then(T::Voronoi, 10, out);
    b.finish()
}

/// Layers of the 1.7 to 1.17 generator.
fn climate_stack(version: McVersion, large_biomes: bool) -> Vec<LayerSpec> {
    use Transform as T;
    let mut b = StackBuilder::default();
    let zoom_rounds = if large_biomes { 6 } else { 4 };
    // Only 1.7 widened rivers along with large biomes.
    let river_rounds = if large_biomes && version == McVersion::V1_7 { 6 } else { 4 };

    let mut top = b.continents(large_biomes);
    top = b.then(T::Land, 50, top);
    top = b.then(T::Land, 70, top);
    top = b.then(T::RemoveTooMuchOcean, 2, top);
    top = b.then(T::Snow, 2, top);
    top = b.then(T::Land, 3, top);
    top = b.then(T::Cool, 2, top);
    top = b.then(T::Heat, 2, top);
    top = b.then(T::Special, 3, top);
    top = b.then(T::Zoom, 2002, top);
    top = b.then(T::Zoom, 2003, top);
    top = b.then(T::Land, 4, top);
    top = b.then(T::Mushroom, 5, top);
    let deep = b.then(T::DeepOcean, 4, top);

    let river_init = b.then(T::RiverInit, 100, deep);
    // Before 1.13 the hill noise zooms are unsalted and still draw from a
    // zero seed; the rivers get their own salted chain.
    let (hill_a, hill_b) = if version >= McVersion::V1_13 { (1000, 1001) } else { (0, 0) };
    let mut hill_noise = b.then(T::Zoom, hill_a, river_init);
    hill_noise = b.then(T::Zoom, hill_b, hill_noise);

    let mut biomes = b.then(T::Biome, 200, deep);
    if version >= McVersion::V1_14 {
        biomes = b.then(T::Bamboo, 1001, biomes);
    }
    biomes = b.zooms(biomes, 1000, 2);
    biomes = b.then(T::BiomeEdge, 1000, biomes);
    biomes = b.mix(T::Hills, 1000, biomes, hill_noise);

    let mut rivers = b.zooms(river_init, 1000, 2);
    rivers = b.zooms(rivers, 1000, river_rounds);
    rivers = b.then(T::River, 1, rivers);
    rivers = b.then(T::Smooth, 1000, rivers);

    biomes = b.then(T::RareBiome, 1001, biomes);
    for k in 0..zoom_rounds {
        biomes = b.then(T::Zoom, 1000 + k, biomes);
        if k == 0 {
            biomes = b.then(T::Land, 3, biomes);
        }
        if k == 1 {
            biomes = b.then(T::Shore, 1000, biomes);
        }
    }
    biomes = b.then(T::Smooth, 1000, biomes);
    let mut out = b.mix(T::RiverMix, 100, biomes, rivers);

    if version >= McVersion::V1_13 {
        let mut oceans = b.source(T::OceanTemp, 2, 256);
        oceans = b.zooms(oceans, 2001, 6);
        out = b.mix(T::OceanMix, 100, out, oceans);
    }

    if version >= McVersion::V1_15 {
        b.then(T::Voronoi3d, 10, out);
    } else {
        b.then(T::Voronoi, 10, out);
    }
    b.finish()
}

/// The stack description for a version, output layer last.
pub fn stack_specs(version: McVersion, large_biomes: bool) -> Result<Vec<LayerSpec>, GenError> {
    if version.era() != Era::Legacy {
        return Err(GenError::UnsupportedVersion(format!(
            "{version} does not use the layer pipeline"
        )));
    }
    if large_biomes && !version.supports_large_biomes() {
        return Err(GenError::UnsupportedVersion(format!(
            "{version} has no large biomes"
        )));
    }
    Ok(if version < McVersion::V1_7 {
        early_stack(version, large_biomes)
    } else {
        climate_stack(version, large_biomes)
    })
}

/// Check that parents precede their children and that every transform gets
/// the inputs it needs.
fn validate(version: McVersion, specs: &[LayerSpec]) -> Result<(), GenError> {
    let malformed = |idx: usize, why: &str| {
        GenError::UnsupportedVersion(format!("{version}: layer {idx} {why}"))
    };
    if specs.is_empty() {
        return Err(malformed(0, "missing"));
    }
    for (idx, spec) in specs.iter().enumerate() {
        let count = match spec.parents {
            [None, None] => 0,
            [Some(_), None] => 1,
            [Some(_), Some(_)] => 2,
            [None, Some(_)] => return Err(malformed(idx, "has a secondary input without a main one")),
        };
        if spec.parents.iter().flatten().any(|&p| p >= idx) {
            return Err(malformed(idx, "reads a layer defined after it"));
        }
        if !spec.transform.accepts(count) {
            return Err(malformed(
                idx,
                &format!("({}) cannot take {count} inputs", spec.transform.label()),
            ));
        }
        if count == 0 && spec.source_scale == 0 {
            return Err(malformed(idx, "is a source without a scale"));
        }
    }
    Ok(())
}

/// Build the layer graph of validated specs for one world seed.
fn instantiate(version: McVersion, specs: &[LayerSpec], world_seed: u64) -> Vec<Arc<Layer>> {
    let mut layers: Vec<Arc<Layer>> = Vec::with_capacity(specs.len());
    for spec in specs {
        let (inputs, scale) = match spec.parents {
            [Some(main), second] => {
                let main = Arc::clone(&layers[main]);
                let scale = (main.scale() / spec.transform.zoom()).max(1);
                let inputs = match second {
                    Some(other) => Inputs::Two(main, Arc::clone(&layers[other])),
                    None => Inputs::One(main),
                };
                (inputs, scale)
            }
            _ => (Inputs::Source, spec.source_scale),
        };
        layers.push(Arc::new(Layer::new(
            spec.transform,
            version,
            spec.salt,
            scale,
            inputs,
            world_seed,
        )));
    }
    layers
}

/// A seeded legacy generator graph.
#[derive(Debug, Clone)]
pub struct LayerStack {
    version: McVersion,
    large_biomes: bool,
    world_seed: u64,
    specs: Vec<LayerSpec>,
    layers: Vec<Arc<Layer>>,
}

impl LayerStack {
    /// Build the stack for `version`, bound to world seed 0.
    pub fn new(version: McVersion, large_biomes: bool) -> Result<Self, GenError> {
        Self::with_seed(version, large_biomes, 0)
    }

    /// Build the stack for `version` and bind it to `world_seed`.
    pub fn with_seed(version: McVersion, large_biomes: bool, world_seed: u64) -> Result<Self, GenError> {
        let specs = stack_specs(version, large_biomes)?;
        Self::from_specs(version, large_biomes, specs, world_seed)
    }

    /// Build a stack from custom specs, output layer last.
    pub fn from_specs(
        version: McVersion,
        large_biomes: bool,
        specs: Vec<LayerSpec>,
        world_seed: u64,
    ) -> Result<Self, GenError> {
        validate(version, &specs)?;
        let layers = instantiate(version, &specs, world_seed);
        debug!(%version, large_biomes, layers = layers.len(), "built layer stack");
        Ok(Self {
            version,
            large_biomes,
            world_seed,
            specs,
            layers,
        })
    }

    /// Rebind every layer to `world_seed`. Reapplying the current seed
    /// changes nothing.
    #[instrument(skip(self), fields(version = %self.version))]
    pub fn apply_seed(&mut self, world_seed: u64) {
        if world_seed == self.world_seed {
            return;
        }
        self.layers = instantiate(self.version, &self.specs, world_seed);
        self.world_seed = world_seed;
        debug!("reseeded layer stack");
    }

    /// Version the stack generates.
    pub fn version(&self) -> McVersion {
        self.version
    }

    /// Whether this is the large-biome variant.
    pub fn large_biomes(&self) -> bool {
        self.large_biomes
    }

    /// World seed the layers are bound to.
    pub fn world_seed(&self) -> u64 {
        self.world_seed
    }

    /// The stack description.
    pub fn specs(&self) -> &[LayerSpec] {
        &self.specs
    }

    /// Every layer in build order.
    pub fn layers(&self) -> impl Iterator<Item = &Arc<Layer>> {
        self.layers.iter()
    }

    /// The final 1:1 layer.
    pub fn output(&self) -> &Arc<Layer> {
        // validate() rejects empty specs.
        &self.layers[self.layers.len() - 1]
    }

    /// Entry layer for `scale`: the first layer of that scale found walking
    /// the main chain back from the output.
    pub fn entry(&self, scale: u32) -> Option<&Arc<Layer>> {
        if !ENTRY_SCALES.contains(&scale) {
            return None;
        }
        let mut layer = self.output();
        loop {
            if layer.scale() == scale {
                return Some(layer);
            }
            layer = layer.parent()?;
        }
    }

    /// Row-major `w × h` grid of biome ids at `scale`.
    pub fn area(&self, scale: u32, x: i32, z: i32, w: usize, h: usize) -> Result<Vec<i32>, GenError> {
        let entry = self.entry(scale).ok_or_else(|| GenError::UnsupportedScale {
            scale,
            version: self.version.to_string(),
        })?;
        Ok(entry.generate(x, z, w, h))
    }

    /// Biome id of one cell at `scale`.
    pub fn biome_at(&self, scale: u32, x: i32, z: i32) -> Result<i32, GenError> {
        let cells = self.area(scale, x, z, 1, 1)?;
        Ok(cells.first().copied().unwrap_or(BiomeId::NONE.0))
    }
}
