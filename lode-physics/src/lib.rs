pub mod attributes;
mod collision;
mod liquid;
pub mod math;
mod movement;
pub mod player;
pub mod simulator;
pub mod world;

pub use attributes::{AttributeValue, Modifier, ModifierOp};
pub use math::Aabb;
pub use player::{ActiveEffect, Control, EntitySnapshot, ItemStack, PlayerState};
pub use simulator::{BubbleDrag, PhysicsError, PhysicsSettings, Simulator};
pub use world::{Block, BlockProperties, BlockWorld, BoundsKind, Facing};
