use std::f64::consts::PI;

use glam::{DVec3, IVec3};

use crate::attributes::{AttributeValue, Modifier, ModifierOp};
use crate::player::PlayerState;
use crate::simulator::Simulator;
use crate::world::BlockWorld;

impl Simulator {
    /// Advance the player by one tick.
    pub fn simulate(&self, state: &mut PlayerState, world: &impl BlockWorld) {
        // The tall Y contraction keeps the head out of the water test.
        let water_bb = self.player_bb(state.pos).contract(0.001, 0.401, 0.001);
        let lava_bb = self.player_bb(state.pos).contract(0.1, 0.4, 0.1);
        state.is_in_water = self.is_in_water_apply_current(world, &water_bb, &mut state.vel);
        state.is_in_lava = self.is_lava_in_bb(world, &lava_bb);

        if state.vel.x.abs() < self.settings.negligeable_velocity {
            state.vel.x = 0.0;
        }
        if state.vel.y.abs() < self.settings.negligeable_velocity {
            state.vel.y = 0.0;
        }
        if state.vel.z.abs() < self.settings.negligeable_velocity {
            state.vel.z = 0.0;
        }

        if state.control.jump || state.jump_queued {
            if state.jump_ticks > 0 {
                state.jump_ticks -= 1;
            }
            if state.is_in_water || state.is_in_lava {
                state.vel.y += 0.04;
            } else if state.on_ground && state.jump_ticks == 0 {
                let below = world.block_at_pos(state.pos.floor() + DVec3::new(0.0, -0.5, 0.0));
                let on_honey = below.is_some_and(|b| Some(b.id) == self.blocks.honey_block);
                state.vel.y = self.settings.jump_velocity
                    * if on_honey {
                        self.settings.honeyblock_jump_speed
                    } else {
                        1.0
                    };
                if state.jump_boost > 0 {
                    state.vel.y += 0.1 * f64::from(state.jump_boost);
                }
                if state.control.sprint {
                    let yaw = PI - state.yaw;
                    state.vel.x -= yaw.sin() * 0.2;
                    state.vel.z += yaw.cos() * 0.2;
                }
                state.jump_ticks = self.settings.autojump_cooldown;
            }
        } else {
            state.jump_ticks = 0;
        }
        state.jump_queued = false;

        let mut strafe = state.strafe_input() * 0.98;
        let mut forward = state.forward_input() * 0.98;
        if state.control.sneak {
            strafe *= self.settings.sneak_speed;
            forward *= self.settings.sneak_speed;
        }

        state.elytra_flying = state.elytra_flying
            && state.elytra_equipped
            && !state.on_ground
            && state.levitation == 0;

        if state.firework_rocket_duration > 0 {
            if state.elytra_flying {
                let look = look_vector(state);
                state.vel.x += look.x * 0.1 + (look.x * 1.5 - state.vel.x) * 0.5;
                state.vel.y += look.y * 0.1 + (look.y * 1.5 - state.vel.y) * 0.5;
                state.vel.z += look.z * 0.1 + (look.z * 1.5 - state.vel.z) * 0.5;
                state.firework_rocket_duration -= 1;
            } else {
                state.firework_rocket_duration = 0;
            }
        }

        self.move_with_heading(state, world, strafe, forward);
    }

    fn move_with_heading(
        &self,
        state: &mut PlayerState,
        world: &impl BlockWorld,
        strafe: f64,
        forward: f64,
    ) {
        let gravity_multiplier = if state.vel.y <= 0.0 && state.slow_falling > 0 {
            self.settings.slow_falling
        } else {
            1.0
        };

        if state.is_in_water || state.is_in_lava {
            let last_y = state.pos.y;
            let mut acceleration = self.settings.liquid_acceleration;
            let inertia = if state.is_in_water {
                self.settings.water_inertia
            } else {
                self.settings.lava_inertia
            };
            let mut horizontal_inertia = inertia;

            if state.is_in_water {
                let mut strider = f64::from(state.depth_strider.min(3));
                if !state.on_ground {
                    strider *= 0.5;
                }
                if strider > 0.0 {
                    horizontal_inertia += (0.546 - horizontal_inertia) * strider / 3.0;
                    acceleration += (0.7 - acceleration) * strider / 3.0;
                }
                if state.dolphins_grace > 0 {
                    horizontal_inertia = 0.96;
                }
            }

            apply_heading(state, strafe, forward, acceleration);
            let DVec3 { x, y, z } = state.vel;
            self.move_entity(state, world, x, y, z);
            let liquid_gravity = if state.is_in_water {
                self.water_gravity
            } else {
                self.lava_gravity
            };
            state.vel.y *= inertia;
            state.vel.y -= liquid_gravity * gravity_multiplier;
            state.vel.x *= horizontal_inertia;
            state.vel.z *= horizontal_inertia;

            if state.is_collided_horizontally {
                let hop = state.pos
                    + DVec3::new(
                        state.vel.x,
                        state.vel.y + 0.6 - state.pos.y + last_y,
                        state.vel.z,
                    );
                if self.position_is_clear(world, hop) {
                    state.vel.y = self.settings.out_of_liquid_impulse;
                }
            }
        } else if state.elytra_flying {
            let pitch = state.pitch;
            let sin_pitch = pitch.sin();
            let cos_pitch = pitch.cos();
            let sq_cos_pitch = cos_pitch * cos_pitch;
            let look = look_vector(state);
            let h_vel = (state.vel.x * state.vel.x + state.vel.z * state.vel.z).sqrt();

            state.vel.y += self.settings.gravity * gravity_multiplier * (-1.0 + sq_cos_pitch * 0.75);

            if state.vel.y < 0.0 && cos_pitch > 0.0 {
                let m = state.vel.y * -0.1 * sq_cos_pitch;
                state.vel.x += look.x * m / cos_pitch;
                state.vel.y += m;
                state.vel.z += look.z * m / cos_pitch;
            }
            if pitch < 0.0 && cos_pitch > 0.0 {
                let m = h_vel * -sin_pitch * 0.04;
                state.vel.x -= look.x * m / cos_pitch;
                state.vel.y += m * 3.2;
                state.vel.z -= look.z * m / cos_pitch;
            }
            if cos_pitch > 0.0 {
                state.vel.x += (look.x / cos_pitch * h_vel - state.vel.x) * 0.1;
                state.vel.z += (look.z / cos_pitch * h_vel - state.vel.z) * 0.1;
            }
            state.vel.x *= 0.99;
            state.vel.y *= 0.98;
            state.vel.z *= 0.99;
            let DVec3 { x, y, z } = state.vel;
            self.move_entity(state, world, x, y, z);
            if state.on_ground {
                state.elytra_flying = false;
            }
        } else {
            let mut acceleration = self.settings.airborne_acceleration;
            let mut inertia = self.settings.airborne_inertia;
            let below = world.block_at_pos(state.pos + DVec3::new(0.0, -1.0, 0.0));
            match (state.on_ground, below) {
                (true, Some(below)) => {
                    let mut scratch;
                    let speed_attr =
                        match state.attributes.get_mut(self.movement_speed_key.as_str()) {
                            Some(attr) => attr,
                            None => {
                                scratch = AttributeValue::new(self.settings.player_speed);
                                &mut scratch
                            }
                        };
                    speed_attr.delete_modifier(self.sprint_uuid);
                    if state.control.sprint && !speed_attr.has_modifier(self.sprint_uuid) {
                        speed_attr.add_modifier(Modifier {
                            uuid: self.sprint_uuid,
                            amount: self.settings.sprint_speed,
                            op: ModifierOp::MultiplyTotal,
                        });
                    }
                    let attribute_speed = speed_attr.value();

                    inertia = self
                        .blocks
                        .slipperiness_of(below.id, self.settings.default_slipperiness)
                        * 0.91;
                    acceleration =
                        (attribute_speed * (0.1627714 / (inertia * inertia * inertia))).max(0.0);
                }
                _ => {
                    if state.control.sprint {
                        acceleration +=
                            self.settings.airborne_acceleration * self.settings.sprint_speed;
                    }
                }
            }

            apply_heading(state, strafe, forward, acceleration);
            if self.is_on_ladder(world, state.pos) {
                let max = self.settings.ladder_max_speed;
                state.vel.x = state.vel.x.clamp(-max, max);
                state.vel.z = state.vel.z.clamp(-max, max);
                let floor = if state.control.sneak { 0.0 } else { -max };
                state.vel.y = state.vel.y.max(floor);
            }
            let DVec3 { x, y, z } = state.vel;
            self.move_entity(state, world, x, y, z);
            if self.is_on_ladder(world, state.pos)
                && (state.is_collided_horizontally
                    || (self.gates.climb_using_jump && state.control.jump))
            {
                state.vel.y = self.settings.ladder_climb_speed;
            }

            if state.levitation > 0 {
                state.vel.y += (0.05 * f64::from(state.levitation) - state.vel.y) * 0.2;
            } else {
                state.vel.y -= self.settings.gravity * gravity_multiplier;
            }
            state.vel.y *= self.settings.airdrag;
            state.vel.x *= inertia;
            state.vel.z *= inertia;
        }
    }

    fn is_on_ladder(&self, world: &impl BlockWorld, pos: DVec3) -> bool {
        let cursor = pos.floor().as_ivec3();
        let Some(block) = world.block_at(cursor) else {
            return false;
        };
        if block.id == self.blocks.ladder || block.id == self.blocks.vine {
            return true;
        }
        if self.gates.climbable_trapdoor && self.blocks.is_trapdoor_id(block.id) && block.is_open()
        {
            let Some(below) = world.block_at(cursor - IVec3::Y) else {
                return false;
            };
            return below.id == self.blocks.ladder
                && below.properties.facing == block.properties.facing;
        }
        false
    }
}

/// Rotate the strafe/forward intent by the yaw and add it to the velocity.
/// Yaw zero faces -Z, hence the half-turn offset.
fn apply_heading(state: &mut PlayerState, mut strafe: f64, mut forward: f64, multiplier: f64) {
    let mut speed = (strafe * strafe + forward * forward).sqrt();
    if speed < 0.01 {
        return;
    }
    speed = multiplier / speed.max(1.0);
    strafe *= speed;
    forward *= speed;
    let yaw = PI - state.yaw;
    let (sin, cos) = yaw.sin_cos();
    state.vel.x -= strafe * cos + forward * sin;
    state.vel.z += forward * cos - strafe * sin;
}

fn look_vector(state: &PlayerState) -> DVec3 {
    let cos_pitch = state.pitch.cos();
    DVec3::new(
        -state.yaw.sin() * cos_pitch,
        state.pitch.sin(),
        -state.yaw.cos() * cos_pitch,
    )
}
