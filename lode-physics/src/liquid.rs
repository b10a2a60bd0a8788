use glam::{DVec3, IVec3};

use crate::math::Aabb;
use crate::simulator::Simulator;
use crate::world::{Block, BlockWorld};

const CARDINALS: [(i32, i32); 4] = [(0, 1), (-1, 0), (0, -1), (1, 0)];

/// Acceleration a unit flow current contributes per axis each tick.
const CURRENT_PULL: f64 = 0.014;

impl Simulator {
    fn is_water_bearing(&self, block: &Block) -> bool {
        self.blocks.is_water_id(block.id)
            || self.blocks.is_water_like_id(block.id)
            || block.is_waterlogged()
    }

    /// Visible fluid height of a block, 0..=7, where 0 is a source or the
    /// top of a flowing column. -1 when the block carries no water. Falling
    /// columns store the high metadata bit and render full.
    pub(crate) fn rendered_depth(&self, block: Option<&Block>) -> i32 {
        let Some(block) = block else {
            return -1;
        };
        if self.blocks.is_water_like_id(block.id) || block.is_waterlogged() {
            return 0;
        }
        if !self.blocks.is_water_id(block.id) {
            return -1;
        }
        let meta = block.metadata as i32;
        if meta >= 8 {
            0
        } else {
            meta
        }
    }

    fn liquid_height_fraction(&self, block: &Block) -> f64 {
        f64::from(self.rendered_depth(Some(block)) + 1) / 9.0
    }

    /// Horizontal current of one water block, from the depth gradient
    /// against its four neighbours. Falling columns against a wall are
    /// biased steeply downward.
    pub(crate) fn flow(&self, world: &impl BlockWorld, block: &Block) -> DVec3 {
        let level = self.rendered_depth(Some(block));
        let mut flow = DVec3::ZERO;
        for (dx, dz) in CARDINALS {
            let adj_pos = block.position + IVec3::new(dx, 0, dz);
            let adj = world.block_at(adj_pos);
            let adj_level = self.rendered_depth(adj.as_ref());
            if adj_level < 0 {
                if adj.is_some_and(|b| b.is_obstacle()) {
                    let below = world.block_at(adj_pos - IVec3::Y);
                    let below_level = self.rendered_depth(below.as_ref());
                    if below_level >= 0 {
                        let f = f64::from(below_level - (level - 8));
                        flow.x += f64::from(dx) * f;
                        flow.z += f64::from(dz) * f;
                    }
                }
            } else {
                let f = f64::from(adj_level - level);
                flow.x += f64::from(dx) * f;
                flow.z += f64::from(dz) * f;
            }
        }

        if block.metadata >= 8 {
            let mut against_obstacle = false;
            for (dx, dz) in CARDINALS {
                let adj = world.block_at(block.position + IVec3::new(dx, 0, dz));
                let above = world.block_at(block.position + IVec3::new(dx, 1, dz));
                if adj.is_some_and(|b| b.is_obstacle()) || above.is_some_and(|b| b.is_obstacle())
                {
                    against_obstacle = true;
                    break;
                }
            }
            if against_obstacle {
                flow = flow.normalize_or_zero() + DVec3::new(0.0, -6.0, 0.0);
            }
        }

        flow.normalize_or_zero()
    }

    /// The water-bearing blocks whose rendered surface reaches into `bb`.
    fn water_in_bb(&self, world: &impl BlockWorld, bb: &Aabb) -> Vec<Block> {
        let mut found = Vec::new();
        let y0 = bb.min.y.floor() as i32;
        let y1 = bb.max.y.floor() as i32;
        let z0 = bb.min.z.floor() as i32;
        let z1 = bb.max.z.floor() as i32;
        let x0 = bb.min.x.floor() as i32;
        let x1 = bb.max.x.floor() as i32;
        for y in y0..=y1 {
            for z in z0..=z1 {
                for x in x0..=x1 {
                    let Some(block) = world.block_at(IVec3::new(x, y, z)) else {
                        continue;
                    };
                    if !self.is_water_bearing(&block) {
                        continue;
                    }
                    let surface = f64::from(y) + 1.0 - self.liquid_height_fraction(&block);
                    if bb.max.y.ceil() >= surface {
                        found.push(block);
                    }
                }
            }
        }
        found
    }

    pub(crate) fn any_water_in_bb(&self, world: &impl BlockWorld, bb: &Aabb) -> bool {
        !self.water_in_bb(world, bb).is_empty()
    }

    /// Water test plus current: sums the flow of every touching water block
    /// and, when the sum is nonzero, pulls the velocity along its direction.
    pub(crate) fn is_in_water_apply_current(
        &self,
        world: &impl BlockWorld,
        bb: &Aabb,
        vel: &mut DVec3,
    ) -> bool {
        let blocks = self.water_in_bb(world, bb);
        let mut acceleration = DVec3::ZERO;
        for block in &blocks {
            acceleration += self.flow(world, block);
        }
        let len = acceleration.length();
        if len > 0.0 {
            *vel += acceleration / len * CURRENT_PULL;
        }
        !blocks.is_empty()
    }

    pub(crate) fn is_lava_in_bb(&self, world: &impl BlockWorld, bb: &Aabb) -> bool {
        let y0 = bb.min.y.floor() as i32;
        let y1 = bb.max.y.floor() as i32;
        let z0 = bb.min.z.floor() as i32;
        let z1 = bb.max.z.floor() as i32;
        let x0 = bb.min.x.floor() as i32;
        let x1 = bb.max.x.floor() as i32;
        for y in y0..=y1 {
            for z in z0..=z1 {
                for x in x0..=x1 {
                    if world
                        .block_at(IVec3::new(x, y, z))
                        .is_some_and(|b| self.blocks.is_lava_id(b.id))
                    {
                        return true;
                    }
                }
            }
        }
        false
    }
}
