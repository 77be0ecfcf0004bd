//! Layer nodes and the window helpers the transforms share.

use std::sync::Arc;

use seedmap_core::voronoi::voronoi_sha;
use seedmap_core::{BiomeId, JavaRandom, LayerSeed, McVersion};
use seedmap_noise::PerlinNoise;

use crate::{biome, climate, hills, land, ocean, river, shore, voronoi, zoom};

/// Grid transform applied by a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transform {
    /// Random land seeds on an ocean plane; the origin is always land.
    Continent,
    /// Doubling zoom that always breaks disagreements at random.
    ZoomFuzzy,
    /// Doubling zoom preferring the majority of the four parents.
    Zoom,
    /// Grows and erodes coastlines.
    Land,
    /// Turns isolated ocean cells into land.
    RemoveTooMuchOcean,
    /// Assigns climate classes to land.
    Snow,
    /// Keeps warm land away from cold land.
    Cool,
    /// Keeps freezing land away from temperate land.
    Heat,
    /// Marks rare climate variants in the high bits.
    Special,
    /// Drops mushroom islands into open ocean.
    Mushroom,
    /// Deepens ocean surrounded by ocean.
    DeepOcean,
    /// Picks a concrete biome per climate class.
    Biome,
    /// Replaces some jungle with bamboo jungle.
    Bamboo,
    /// Seeds the river noise.
    RiverInit,
    /// Inserts transition biomes between incompatible neighbours.
    BiomeEdge,
    /// Hill and mutated variants.
    Hills,
    /// Rare sunflower plains.
    RareBiome,
    /// Beaches and other shore variants.
    Shore,
    /// Rivers through swamps and jungles.
    SwampRiver,
    /// Edges of the river noise become river.
    River,
    /// Removes single-cell noise.
    Smooth,
    /// Lays the river grid over the biome grid.
    RiverMix,
    /// Perlin ocean temperatures.
    OceanTemp,
    /// Lays the ocean temperatures over the biome grid.
    OceanMix,
    /// 2D jittered voronoi zoom from 1:4 to 1:1.
    Voronoi,
    /// SHA-seeded 3D voronoi zoom sampled at y = 0.
    Voronoi3d,
}

impl Transform {
    /// How many times finer the output is than the main parent.
    pub fn zoom(self) -> u32 {
        match self {
            Transform::Zoom | Transform::ZoomFuzzy => 2,
            Transform::Voronoi | Transform::Voronoi3d => 4,
            _ => 1,
        }
    }

    /// Short label used in layer dumps.
    pub fn label(self) -> &'static str {
        use Transform as T;
        match self {
            T::Continent => "continent",
            T::ZoomFuzzy => "zoom_fuzzy",
            T::Zoom => "zoom",
            T::Land => "land",
            T::RemoveTooMuchOcean => "remove_ocean",
            T::Snow => "snow",
            T::Cool => "cool",
            T::Heat => "heat",
            T::Special => "special",
            T::Mushroom => "mushroom",
            T::DeepOcean => "deep_ocean",
            T::Biome => "biome",
            T::Bamboo => "bamboo",
            T::RiverInit => "river_init",
            T::BiomeEdge => "biome_edge",
            T::Hills => "hills",
            T::RareBiome => "rare_biome",
            T::Shore => "shore",
            T::SwampRiver => "swamp_river",
            T::River => "river",
            T::Smooth => "smooth",
            T::RiverMix => "river_mix",
            T::OceanTemp => "ocean_temp",
            T::OceanMix => "ocean_mix",
            T::Voronoi => "voronoi",
            T::Voronoi3d => "voronoi_3d",
        }
    }

    /// Whether the transform can run with `parents` inputs.
    pub fn accepts(self, parents: usize) -> bool {
        match self {
            Transform::Continent | Transform::OceanTemp => parents == 0,
            Transform::RiverMix | Transform::OceanMix => parents == 2,
            Transform::Hills => parents == 1 || parents == 2,
            _ => parents == 1,
        }
    }
}

#[derive(Debug)]
pub(crate) enum Inputs {
    Source,
    One(Arc<Layer>),
    Two(Arc<Layer>, Arc<Layer>),
}

/// A seeded node of the layer graph.
#[derive(Debug)]
pub struct Layer {
    transform: Transform,
    version: McVersion,
    salt: u64,
    scale: u32,
    pub(crate) seed: LayerSeed,
    pub(crate) sha: u64,
    pub(crate) noise: Option<PerlinNoise>,
    pub(crate) inputs: Inputs,
}

impl Layer {
    pub(crate) fn new(
        transform: Transform,
        version: McVersion,
        salt: u64,
        scale: u32,
        inputs: Inputs,
        world_seed: u64,
    ) -> Self {
        let sha = match transform {
            Transform::Voronoi3d => voronoi_sha(world_seed),
            _ => 0,
        };
        let noise = match transform {
            Transform::OceanTemp => Some(PerlinNoise::new(&mut JavaRandom::new(world_seed as i64))),
            _ => None,
        };
        Self {
            transform,
            version,
            salt,
            scale,
            seed: LayerSeed::derive(world_seed, salt),
            sha,
            noise,
            inputs,
        }
    }

    /// Label used in dumps, e.g. `"river_mix"`.
    pub fn name(&self) -> &'static str {
        self.transform.label()
    }

    /// The transform this layer applies.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Version whose rules the transform follows.
    pub fn version(&self) -> McVersion {
        self.version
    }

    /// Base salt before layer mixing.
    pub fn salt(&self) -> u64 {
        self.salt
    }

    /// Blocks per output cell.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Main parent, if any.
    pub fn parent(&self) -> Option<&Arc<Layer>> {
        match &self.inputs {
            Inputs::Source => None,
            Inputs::One(p) | Inputs::Two(p, _) => Some(p),
        }
    }

    /// Secondary parent of mixing layers.
    pub fn secondary(&self) -> Option<&Arc<Layer>> {
        match &self.inputs {
            Inputs::Two(_, p) => Some(p),
            _ => None,
        }
    }

    /// Generate the `w × h` window whose top-left cell is `(x, z)`, row-major.
    ///
    /// The result for a cell never depends on the window it was requested in.
    pub fn generate(&self, x: i32, z: i32, w: usize, h: usize) -> Vec<i32> {
        if w == 0 || h == 0 {
            return Vec::new();
        }
        use Transform as T;
        match (&self.inputs, self.transform) {
            (Inputs::Source, T::Continent) => land::continent(self, x, z, w, h),
            (Inputs::Source, T::OceanTemp) => ocean::temperature(self, x, z, w, h),
            (Inputs::One(p), T::Zoom) => zoom::zoom(self, p, x, z, w, h, false),
            (Inputs::One(p), T::ZoomFuzzy) => zoom::zoom(self, p, x, z, w, h, true),
            (Inputs::One(p), T::Land) => land::land(self, p, x, z, w, h),
            (Inputs::One(p), T::RemoveTooMuchOcean) => land::remove_too_much_ocean(self, p, x, z, w, h),
            (Inputs::One(p), T::Mushroom) => land::mushroom(self, p, x, z, w, h),
            (Inputs::One(p), T::DeepOcean) => land::deep_ocean(p, x, z, w, h),
            (Inputs::One(p), T::Snow) => climate::snow(self, p, x, z, w, h),
            (Inputs::One(p), T::Cool) => climate::cool(p, x, z, w, h),
            (Inputs::One(p), T::Heat) => climate::heat(p, x, z, w, h),
            (Inputs::One(p), T::Special) => climate::special(self, p, x, z, w, h),
            (Inputs::One(p), T::Biome) => biome::biome(self, p, x, z, w, h),
            (Inputs::One(p), T::Bamboo) => biome::bamboo(self, p, x, z, w, h),
            (Inputs::One(p), T::BiomeEdge) => biome::edge(self, p, x, z, w, h),
            (Inputs::One(p), T::Hills) => hills::hills(self, p, None, x, z, w, h),
            (Inputs::Two(p, r), T::Hills) => hills::hills(self, p, Some(r), x, z, w, h),
            (Inputs::One(p), T::RareBiome) => hills::rare(self, p, x, z, w, h),
            (Inputs::One(p), T::Shore) => shore::shore(self, p, x, z, w, h),
            (Inputs::One(p), T::RiverInit) => river::init(self, p, x, z, w, h),
            (Inputs::One(p), T::River) => river::river(self, p, x, z, w, h),
            (Inputs::One(p), T::Smooth) => river::smooth(self, p, x, z, w, h),
            (Inputs::One(p), T::SwampRiver) => river::swamp(self, p, x, z, w, h),
            (Inputs::Two(p, r), T::RiverMix) => river::mix(self, p, r, x, z, w, h),
            (Inputs::Two(p, o), T::OceanMix) => ocean::mix(p, o, x, z, w, h),
            (Inputs::One(p), T::Voronoi) => voronoi::jittered(self, p, x, z, w, h),
            (Inputs::One(p), T::Voronoi3d) => voronoi::sha_3d(self, p, x, z, w, h),
            // Arity is checked when the stack is built.
            _ => vec![BiomeId::NONE.0; w * h],
        }
    }
}

/// World coordinate of the `i`th cell of a window starting at `origin`.
#[inline]
pub(crate) fn cell(origin: i32, i: usize) -> i32 {
    origin.wrapping_add(i as i32)
}

/// Fill a row-major `w × h` grid from `f(i, j)`.
pub(crate) fn fill(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> i32) -> Vec<i32> {
    let mut out = Vec::with_capacity(w * h);
    for j in 0..h {
        for i in 0..w {
            out.push(f(i, j));
        }
    }
    out
}

/// The four edge neighbours and the centre of a cell.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cross {
    pub center: i32,
    pub north: i32,
    pub east: i32,
    pub south: i32,
    pub west: i32,
}

impl Cross {
    pub fn neighbours(&self) -> [i32; 4] {
        [self.north, self.east, self.west, self.south]
    }

    pub fn any(&self, f: impl Fn(i32) -> bool) -> bool {
        self.neighbours().into_iter().any(f)
    }

    pub fn all(&self, f: impl Fn(i32) -> bool) -> bool {
        self.neighbours().into_iter().all(f)
    }
}

/// Parent grid fetched with a one-cell margin around the requested window.
pub(crate) struct Padded {
    stride: usize,
    cells: Vec<i32>,
}

impl Padded {
    pub fn fetch(parent: &Layer, x: i32, z: i32, w: usize, h: usize) -> Self {
        Self {
            stride: w + 2,
            cells: parent.generate(x.wrapping_sub(1), z.wrapping_sub(1), w + 2, h + 2),
        }
    }

    /// Value at offset `(dx, dz)` in `-1..=1` from output cell `(i, j)`.
    #[inline]
    pub fn at(&self, i: usize, j: usize, dx: isize, dz: isize) -> i32 {
        let col = (i as isize + 1 + dx) as usize;
        let row = (j as isize + 1 + dz) as usize;
        self.cells[row * self.stride + col]
    }

    #[inline]
    pub fn cross(&self, i: usize, j: usize) -> Cross {
        Cross {
            center: self.at(i, j, 0, 0),
            north: self.at(i, j, 0, -1),
            east: self.at(i, j, 1, 0),
            south: self.at(i, j, 0, 1),
            west: self.at(i, j, -1, 0),
        }
    }

    /// Corner neighbours in the order north-west, north-east, south-west,
    /// south-east.
    #[inline]
    pub fn diagonals(&self, i: usize, j: usize) -> [i32; 4] {
        [
            self.at(i, j, -1, -1),
            self.at(i, j, 1, -1),
            self.at(i, j, -1, 1),
            self.at(i, j, 1, 1),
        ]
    }
}
