use glam::{DVec3, IVec3};

use crate::math::Aabb;
use crate::player::PlayerState;
use crate::simulator::Simulator;
use crate::world::BlockWorld;

const SNEAK_EDGE_STEP: f64 = 0.05;

impl Simulator {
    pub(crate) fn player_bb(&self, pos: DVec3) -> Aabb {
        let w = self.settings.player_half_width;
        Aabb::new(
            DVec3::new(pos.x - w, pos.y, pos.z - w),
            DVec3::new(pos.x + w, pos.y + self.settings.player_height, pos.z + w),
        )
    }

    /// Every collision shape in the lattice range of `query`. The range dips
    /// one block below `min.y` so tall shapes (fences, walls) rooted under
    /// the box still contribute.
    pub(crate) fn surrounding_boxes(
        &self,
        world: &impl BlockWorld,
        query: &Aabb,
    ) -> Vec<Aabb> {
        let mut boxes = Vec::new();
        let y0 = query.min.y.floor() as i32 - 1;
        let y1 = query.max.y.floor() as i32;
        let z0 = query.min.z.floor() as i32;
        let z1 = query.max.z.floor() as i32;
        let x0 = query.min.x.floor() as i32;
        let x1 = query.max.x.floor() as i32;
        for y in y0..=y1 {
            for z in z0..=z1 {
                for x in x0..=x1 {
                    let Some(block) = world.block_at(IVec3::new(x, y, z)) else {
                        continue;
                    };
                    let base = block.position.as_dvec3();
                    for shape in &block.shapes {
                        boxes.push(Aabb::new(
                            base + DVec3::new(shape[0], shape[1], shape[2]),
                            base + DVec3::new(shape[3], shape[4], shape[5]),
                        ));
                    }
                }
            }
        }
        boxes
    }

    /// Free of solid colliders and of water; the test vanilla uses before
    /// letting an entity hop out of a liquid onto a ledge.
    pub(crate) fn position_is_clear(&self, world: &impl BlockWorld, pos: DVec3) -> bool {
        let bb = self.player_bb(pos);
        let blocked = self
            .surrounding_boxes(world, &bb)
            .iter()
            .any(|block| block.intersects(&bb));
        !blocked && !self.any_water_in_bb(world, &bb)
    }

    /// Settle a position onto the terrain by sweeping the player box down by
    /// at most one block.
    pub fn adjust_position_height(&self, world: &impl BlockWorld, pos: &mut DVec3) {
        let player_bb = self.player_bb(*pos);
        let query = player_bb.extend(0.0, -1.0, 0.0);
        let mut dy = -1.0;
        for block in self.surrounding_boxes(world, &query) {
            dy = block.compute_offset_y(&player_bb, dy);
        }
        pos.y += dy;
    }

    /// Resolve a candidate translation against the world and update the
    /// position, velocity, and contact flags. Axis order is Y then X then Z
    /// so horizontal sweeps run at the post-landing height.
    pub(crate) fn move_entity(
        &self,
        state: &mut PlayerState,
        world: &impl BlockWorld,
        mut dx: f64,
        mut dy: f64,
        mut dz: f64,
    ) {
        if state.is_in_web {
            dx *= 0.25;
            dy *= 0.05;
            dz *= 0.25;
            state.vel = DVec3::ZERO;
            state.is_in_web = false;
        }

        let old_vel_x = dx;
        let old_vel_y = dy;
        let old_vel_z = dz;

        // Sneaking on an edge: walk the horizontal deltas back toward zero
        // until the offset box has terrain in range again. A shrink here
        // counts as a clamp for the contact flags and velocity zeroing.
        if state.control.sneak && state.on_ground {
            while dx != 0.0
                && self
                    .surrounding_boxes(world, &self.player_bb(state.pos).offset(dx, 0.0, 0.0))
                    .is_empty()
            {
                dx = shrink_toward_zero(dx);
            }
            while dz != 0.0
                && self
                    .surrounding_boxes(world, &self.player_bb(state.pos).offset(0.0, 0.0, dz))
                    .is_empty()
            {
                dz = shrink_toward_zero(dz);
            }
            while dx != 0.0
                && dz != 0.0
                && self
                    .surrounding_boxes(world, &self.player_bb(state.pos).offset(dx, 0.0, dz))
                    .is_empty()
            {
                dx = shrink_toward_zero(dx);
                dz = shrink_toward_zero(dz);
            }
        }

        // The deltas entering the axis sweeps; the step-up retries with
        // these, not with anything the edge-guard already gave up.
        let entry_dx = dx;
        let entry_dz = dz;

        let start_bb = self.player_bb(state.pos);
        let mut player_bb = start_bb;
        let surrounding = self.surrounding_boxes(world, &player_bb.extend(dx, dy, dz));

        for block in &surrounding {
            dy = block.compute_offset_y(&player_bb, dy);
        }
        player_bb = player_bb.offset(0.0, dy, 0.0);
        for block in &surrounding {
            dx = block.compute_offset_x(&player_bb, dx);
        }
        player_bb = player_bb.offset(dx, 0.0, 0.0);
        for block in &surrounding {
            dz = block.compute_offset_z(&player_bb, dz);
        }
        player_bb = player_bb.offset(0.0, 0.0, dz);

        if self.settings.step_height > 0.0
            && (state.on_ground || (dy != old_vel_y && old_vel_y < 0.0))
            && (dx != entry_dx || dz != entry_dz)
        {
            let flat_dx = dx;
            let flat_dy = dy;
            let flat_dz = dz;
            let flat_bb = player_bb;

            dy = self.settings.step_height;
            let surrounding =
                self.surrounding_boxes(world, &start_bb.extend(entry_dx, dy, entry_dz));

            // Two candidate step resolutions: one measures the upward sweep
            // with the flat XZ result pre-applied, one from the plain box.
            let mut bb1 = start_bb;
            let mut bb2 = start_bb;
            let bb_xz = bb1.extend(flat_dx, 0.0, flat_dz);

            let mut dy1 = dy;
            let mut dy2 = dy;
            for block in &surrounding {
                dy1 = block.compute_offset_y(&bb_xz, dy1);
                dy2 = block.compute_offset_y(&bb2, dy2);
            }
            bb1 = bb1.offset(0.0, dy1, 0.0);
            bb2 = bb2.offset(0.0, dy2, 0.0);

            let mut dx1 = entry_dx;
            let mut dx2 = entry_dx;
            for block in &surrounding {
                dx1 = block.compute_offset_x(&bb1, dx1);
                dx2 = block.compute_offset_x(&bb2, dx2);
            }
            bb1 = bb1.offset(dx1, 0.0, 0.0);
            bb2 = bb2.offset(dx2, 0.0, 0.0);

            let mut dz1 = entry_dz;
            let mut dz2 = entry_dz;
            for block in &surrounding {
                dz1 = block.compute_offset_z(&bb1, dz1);
                dz2 = block.compute_offset_z(&bb2, dz2);
            }
            bb1 = bb1.offset(0.0, 0.0, dz1);
            bb2 = bb2.offset(0.0, 0.0, dz2);

            let norm1 = dx1 * dx1 + dz1 * dz1;
            let norm2 = dx2 * dx2 + dz2 * dz2;
            if norm1 > norm2 {
                dx = dx1;
                dy = -dy1;
                dz = dz1;
                player_bb = bb1;
            } else {
                dx = dx2;
                dy = -dy2;
                dz = dz2;
                player_bb = bb2;
            }
            for block in &surrounding {
                dy = block.compute_offset_y(&player_bb, dy);
            }
            player_bb = player_bb.offset(0.0, dy, 0.0);

            if flat_dx * flat_dx + flat_dz * flat_dz >= dx * dx + dz * dz {
                dx = flat_dx;
                dy = flat_dy;
                dz = flat_dz;
                player_bb = flat_bb;
            }
        }

        state.pos = DVec3::new(
            player_bb.min.x + self.settings.player_half_width,
            player_bb.min.y,
            player_bb.min.z + self.settings.player_half_width,
        );
        state.is_collided_horizontally = dx != old_vel_x || dz != old_vel_z;
        state.is_collided_vertically = dy != old_vel_y;
        state.on_ground = state.is_collided_vertically && old_vel_y < 0.0;

        let block_at_feet = world.block_at_pos(state.pos + DVec3::new(0.0, -0.2, 0.0));
        if dx != old_vel_x {
            state.vel.x = 0.0;
        }
        if dz != old_vel_z {
            state.vel.z = 0.0;
        }
        if dy != old_vel_y {
            let on_slime = block_at_feet.is_some_and(|b| b.id == self.blocks.slime);
            if on_slime && !state.control.sneak {
                state.vel.y = -state.vel.y;
            } else {
                state.vel.y = 0.0;
            }
        }

        self.apply_contact_effects(state, world, &player_bb);

        if self.gates.velocity_blocks_on_top {
            let below = world.block_at_pos(state.pos.floor() + DVec3::new(0.0, -0.5, 0.0));
            if let Some(block) = below {
                if block.id == self.blocks.soul_sand {
                    state.vel.x *= self.settings.soulsand_speed;
                    state.vel.z *= self.settings.soulsand_speed;
                } else if Some(block.id) == self.blocks.honey_block {
                    state.vel.x *= self.settings.honeyblock_speed;
                    state.vel.z *= self.settings.honeyblock_speed;
                }
            }
        }
    }

    /// Effects of the blocks the settled body overlaps: soul sand and honey
    /// slowdown, cobweb capture for the next tick, bubble column drag.
    fn apply_contact_effects(
        &self,
        state: &mut PlayerState,
        world: &impl BlockWorld,
        player_bb: &Aabb,
    ) {
        let bb = player_bb.contract(0.001, 0.001, 0.001);
        let y0 = bb.min.y.floor() as i32;
        let y1 = bb.max.y.floor() as i32;
        let z0 = bb.min.z.floor() as i32;
        let z1 = bb.max.z.floor() as i32;
        let x0 = bb.min.x.floor() as i32;
        let x1 = bb.max.x.floor() as i32;
        for y in y0..=y1 {
            for z in z0..=z1 {
                for x in x0..=x1 {
                    let cursor = IVec3::new(x, y, z);
                    let Some(block) = world.block_at(cursor) else {
                        continue;
                    };
                    if self.gates.velocity_blocks_on_collision {
                        if block.id == self.blocks.soul_sand {
                            state.vel.x *= self.settings.soulsand_speed;
                            state.vel.z *= self.settings.soulsand_speed;
                        } else if Some(block.id) == self.blocks.honey_block {
                            state.vel.x *= self.settings.honeyblock_speed;
                            state.vel.z *= self.settings.honeyblock_speed;
                        }
                    }
                    if block.id == self.blocks.web {
                        state.is_in_web = true;
                    } else if Some(block.id) == self.blocks.bubble_column {
                        let down = block.metadata == 0;
                        let above_is_air = world
                            .block_at(cursor + IVec3::Y)
                            .is_none_or(|b| b.id == self.blocks.air);
                        let drag = if above_is_air {
                            self.settings.bubble_column_surface_drag
                        } else {
                            self.settings.bubble_column_drag
                        };
                        if down {
                            state.vel.y = (state.vel.y - drag.down).max(drag.max_down);
                        } else {
                            state.vel.y = (state.vel.y + drag.up).min(drag.max_up);
                        }
                    }
                }
            }
        }
    }
}

fn shrink_toward_zero(d: f64) -> f64 {
    if d < SNEAK_EDGE_STEP && d >= -SNEAK_EDGE_STEP {
        0.0
    } else if d > 0.0 {
        d - SNEAK_EDGE_STEP
    } else {
        d + SNEAK_EDGE_STEP
    }
}
