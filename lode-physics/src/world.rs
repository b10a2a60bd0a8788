use glam::{DVec3, IVec3};

/// Read-only block access. `None` means unloaded, which the simulator treats
/// as air everywhere.
pub trait BlockWorld {
    fn block_at(&self, pos: IVec3) -> Option<Block>;

    fn block_at_pos(&self, pos: DVec3) -> Option<Block> {
        self.block_at(pos.floor().as_ivec3())
    }
}

/// One world block as the host hands it out: resolved id, raw metadata, the
/// collision shapes in unit-cube-local coordinates, and the property sheet
/// the physics cares about.
#[derive(Clone, Debug)]
pub struct Block {
    pub position: IVec3,
    pub id: u32,
    pub metadata: u32,
    pub shapes: Vec<[f64; 6]>,
    pub bounds: BoundsKind,
    pub properties: BlockProperties,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsKind {
    Empty,
    Solid,
}

/// Sparse property sheet; absent properties read as closed/unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlockProperties {
    pub open: Option<bool>,
    pub facing: Option<Facing>,
    pub waterlogged: Option<bool>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
    North,
    South,
    East,
    West,
}

impl Block {
    pub fn is_obstacle(&self) -> bool {
        self.bounds == BoundsKind::Solid
    }

    pub fn is_open(&self) -> bool {
        self.properties.open.unwrap_or(false)
    }

    pub fn is_waterlogged(&self) -> bool {
        self.properties.waterlogged.unwrap_or(false)
    }
}
