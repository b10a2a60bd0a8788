use std::collections::{HashMap, HashSet};

use thiserror::Error;
use tracing::debug;

use crate::GameData;

#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("unknown block \"{0}\"")]
    UnknownBlock(&'static str),
}

const SLIPPERINESS_SLIME: f64 = 0.8;
const SLIPPERINESS_ICE: f64 = 0.98;
const SLIPPERINESS_BLUE_ICE: f64 = 0.989;

/// Names that resolve to a trapdoor on some version. Absent names are
/// skipped, so one list covers both the flattened and the legacy id space.
const TRAPDOOR_NAMES: &[&str] = &[
    "trapdoor",
    "oak_trapdoor",
    "iron_trapdoor",
    "spruce_trapdoor",
    "birch_trapdoor",
    "jungle_trapdoor",
    "acacia_trapdoor",
    "dark_oak_trapdoor",
    "crimson_trapdoor",
    "warped_trapdoor",
];

const WATER_LIKE_NAMES: &[&str] = &[
    "seagrass",
    "tall_seagrass",
    "kelp",
    "kelp_plant",
    "bubble_column",
];

/// Block ids the simulator special-cases, resolved once per version from the
/// host registry. Mandatory blocks exist on every supported version; the
/// rest degrade to `None`/empty sets when a version predates them.
#[derive(Debug, Clone)]
pub struct BlockCatalogue {
    slipperiness: HashMap<u32, f64>,
    pub air: u32,
    pub slime: u32,
    pub soul_sand: u32,
    pub honey_block: Option<u32>,
    pub web: u32,
    pub ladder: u32,
    pub vine: u32,
    pub water: u32,
    pub flowing_water: Option<u32>,
    pub lava: u32,
    pub flowing_lava: Option<u32>,
    pub bubble_column: Option<u32>,
    pub trapdoors: HashSet<u32>,
    pub water_like: HashSet<u32>,
}

impl BlockCatalogue {
    pub fn load(data: &impl GameData) -> Result<Self, CatalogueError> {
        let required = |name: &'static str| {
            data.block_id(name)
                .ok_or(CatalogueError::UnknownBlock(name))
        };
        let either = |name: &'static str, legacy: &'static str| {
            data.block_id(name)
                .or_else(|| data.block_id(legacy))
                .ok_or(CatalogueError::UnknownBlock(name))
        };

        let slime = either("slime_block", "slime")?;
        let mut slipperiness = HashMap::new();
        slipperiness.insert(slime, SLIPPERINESS_SLIME);
        slipperiness.insert(required("ice")?, SLIPPERINESS_ICE);
        slipperiness.insert(required("packed_ice")?, SLIPPERINESS_ICE);
        if let Some(id) = data.block_id("frosted_ice") {
            slipperiness.insert(id, SLIPPERINESS_ICE);
        }
        if let Some(id) = data.block_id("blue_ice") {
            slipperiness.insert(id, SLIPPERINESS_BLUE_ICE);
        }

        let mut trapdoors = HashSet::new();
        for &name in TRAPDOOR_NAMES {
            if let Some(id) = data.block_id(name) {
                trapdoors.insert(id);
            }
        }

        let mut water_like = HashSet::new();
        for &name in WATER_LIKE_NAMES {
            match data.block_id(name) {
                Some(id) => {
                    water_like.insert(id);
                }
                None => debug!(name, "water-like block absent on this version"),
            }
        }

        Ok(Self {
            slipperiness,
            air: required("air")?,
            slime,
            soul_sand: required("soul_sand")?,
            honey_block: data.block_id("honey_block"),
            web: either("cobweb", "web")?,
            ladder: required("ladder")?,
            vine: required("vine")?,
            water: required("water")?,
            flowing_water: data.block_id("flowing_water"),
            lava: required("lava")?,
            flowing_lava: data.block_id("flowing_lava"),
            bubble_column: data.block_id("bubble_column"),
            trapdoors,
            water_like,
        })
    }

    pub fn slipperiness_of(&self, id: u32, default: f64) -> f64 {
        self.slipperiness.get(&id).copied().unwrap_or(default)
    }

    pub fn is_water_id(&self, id: u32) -> bool {
        id == self.water || self.flowing_water == Some(id)
    }

    pub fn is_lava_id(&self, id: u32) -> bool {
        id == self.lava || self.flowing_lava == Some(id)
    }

    pub fn is_water_like_id(&self, id: u32) -> bool {
        self.water_like.contains(&id)
    }

    pub fn is_trapdoor_id(&self, id: u32) -> bool {
        self.trapdoors.contains(&id)
    }
}
