use thiserror::Error;
use uuid::Uuid;

use lode_data::{BlockCatalogue, FeatureSet};

#[derive(Debug, Error)]
pub enum PhysicsError {
    #[error("no liquid gravity settings")]
    NoLiquidGravity,
}

/// Drag applied while intersecting a bubble column, one set per column kind.
#[derive(Clone, Copy, Debug)]
pub struct BubbleDrag {
    pub down: f64,
    pub max_down: f64,
    pub up: f64,
    pub max_up: f64,
}

/// The movement constants of the reference client. `airdrag` and the jump
/// base are binary32 values widened to binary64; skipping that round-trip
/// drifts long trajectories.
#[derive(Clone, Copy, Debug)]
pub struct PhysicsSettings {
    pub gravity: f64,
    pub airdrag: f64,
    pub yaw_speed: f64,
    pub pitch_speed: f64,
    pub player_speed: f64,
    pub sprint_speed: f64,
    pub sneak_speed: f64,
    pub step_height: f64,
    pub negligeable_velocity: f64,
    pub soulsand_speed: f64,
    pub honeyblock_speed: f64,
    pub honeyblock_jump_speed: f64,
    pub ladder_max_speed: f64,
    pub ladder_climb_speed: f64,
    pub player_half_width: f64,
    pub player_height: f64,
    pub water_inertia: f64,
    pub lava_inertia: f64,
    pub liquid_acceleration: f64,
    pub airborne_inertia: f64,
    pub airborne_acceleration: f64,
    pub default_slipperiness: f64,
    pub out_of_liquid_impulse: f64,
    pub autojump_cooldown: u32,
    pub jump_velocity: f64,
    pub slow_falling: f64,
    pub bubble_column_surface_drag: BubbleDrag,
    pub bubble_column_drag: BubbleDrag,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: 0.08,
            airdrag: f64::from(1.0_f32 - 0.02_f32),
            yaw_speed: 3.0,
            pitch_speed: 3.0,
            player_speed: 0.1,
            sprint_speed: 0.3,
            sneak_speed: 0.3,
            step_height: 0.6,
            negligeable_velocity: 0.003,
            soulsand_speed: 0.4,
            honeyblock_speed: 0.4,
            honeyblock_jump_speed: 0.4,
            ladder_max_speed: 0.15,
            ladder_climb_speed: 0.2,
            player_half_width: 0.3,
            player_height: 1.8,
            water_inertia: 0.8,
            lava_inertia: 0.5,
            liquid_acceleration: 0.02,
            airborne_inertia: 0.91,
            airborne_acceleration: 0.02,
            default_slipperiness: 0.6,
            out_of_liquid_impulse: 0.3,
            autojump_cooldown: 10,
            jump_velocity: f64::from(0.42_f32),
            slow_falling: 0.125,
            bubble_column_surface_drag: BubbleDrag {
                down: 0.03,
                max_down: -0.9,
                up: 0.1,
                max_up: 1.8,
            },
            bubble_column_drag: BubbleDrag {
                down: 0.03,
                max_down: -0.3,
                up: 0.06,
                max_up: 0.7,
            },
        }
    }
}

/// Feature gates the arithmetic branches on, resolved once at construction.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Gates {
    pub velocity_blocks_on_collision: bool,
    pub velocity_blocks_on_top: bool,
    pub climb_using_jump: bool,
    pub climbable_trapdoor: bool,
}

/// The per-version simulator: an immutable bundle of block catalogue,
/// resolved feature gates, and movement constants. One tick =
/// [`Simulator::simulate`]; the world is a per-call argument.
#[derive(Debug)]
pub struct Simulator {
    pub(crate) blocks: BlockCatalogue,
    pub(crate) settings: PhysicsSettings,
    pub(crate) gates: Gates,
    pub(crate) water_gravity: f64,
    pub(crate) lava_gravity: f64,
    pub(crate) movement_speed_key: String,
    pub(crate) sprint_uuid: Uuid,
}

impl Simulator {
    pub fn new(
        blocks: BlockCatalogue,
        features: &FeatureSet,
        movement_speed_key: impl Into<String>,
    ) -> Result<Self, PhysicsError> {
        let settings = PhysicsSettings::default();
        let (water_gravity, lava_gravity) = if features.enabled("independentLiquidGravity") {
            (0.02, 0.02)
        } else if features.enabled("proportionalLiquidGravity") {
            (settings.gravity / 16.0, settings.gravity / 4.0)
        } else {
            return Err(PhysicsError::NoLiquidGravity);
        };

        Ok(Self {
            blocks,
            settings,
            gates: Gates {
                velocity_blocks_on_collision: features.enabled("velocityBlocksOnCollision"),
                velocity_blocks_on_top: features.enabled("velocityBlocksOnTop"),
                climb_using_jump: features.enabled("climbUsingJump"),
                climbable_trapdoor: features.enabled("climableTrapdoor"),
            },
            water_gravity,
            lava_gravity,
            movement_speed_key: movement_speed_key.into(),
            sprint_uuid: Uuid::from_u128(0x662a6b8d_da3e_4c1c_8813_96ea6097278d),
        })
    }

    pub fn settings(&self) -> &PhysicsSettings {
        &self.settings
    }
}
