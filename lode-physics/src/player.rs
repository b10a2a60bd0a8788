use std::collections::HashMap;

use glam::DVec3;
use valence_nbt::{Compound, List, Value};

use lode_data::GameData;

use crate::attributes::AttributeValue;

/// Raw control inputs for one tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct Control {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub sprint: bool,
    pub sneak: bool,
}

/// One active status effect as the host tracks it.
#[derive(Clone, Copy, Debug)]
pub struct ActiveEffect {
    pub id: u32,
    pub amplifier: u32,
}

/// An equipped item: resolved name plus its decoded NBT, if any.
#[derive(Clone, Debug)]
pub struct ItemStack {
    pub name: String,
    pub nbt: Option<Compound>,
}

/// Everything the host entity exposes to the simulator. The mutable half is
/// written back by [`PlayerState::apply_to`]; the rest is input only.
#[derive(Clone, Debug, Default)]
pub struct EntitySnapshot {
    pub pos: DVec3,
    pub vel: DVec3,
    pub yaw: f64,
    pub pitch: f64,
    pub on_ground: bool,
    pub is_in_water: bool,
    pub is_in_lava: bool,
    pub is_in_web: bool,
    pub is_collided_horizontally: bool,
    pub is_collided_vertically: bool,
    pub elytra_flying: bool,
    pub jump_ticks: u32,
    pub jump_queued: bool,
    pub firework_rocket_duration: u32,
    pub effects: Vec<ActiveEffect>,
    pub boots: Option<ItemStack>,
    pub chestplate: Option<ItemStack>,
    pub attributes: HashMap<String, AttributeValue>,
}

/// The per-tick simulation state: captured from the host before the tick,
/// stepped by the simulator, written back after.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub pos: DVec3,
    pub vel: DVec3,
    pub yaw: f64,
    pub pitch: f64,
    pub control: Control,
    pub on_ground: bool,
    pub is_in_water: bool,
    pub is_in_lava: bool,
    pub is_in_web: bool,
    pub is_collided_horizontally: bool,
    pub is_collided_vertically: bool,
    pub elytra_flying: bool,
    pub jump_ticks: u32,
    pub jump_queued: bool,
    pub firework_rocket_duration: u32,
    pub jump_boost: u32,
    pub speed: u32,
    pub slowness: u32,
    pub dolphins_grace: u32,
    pub slow_falling: u32,
    pub levitation: u32,
    pub depth_strider: u32,
    pub elytra_equipped: bool,
    pub attributes: HashMap<String, AttributeValue>,
}

impl PlayerState {
    pub fn capture(entity: &EntitySnapshot, control: Control, data: &impl GameData) -> Self {
        let depth_strider = entity
            .boots
            .as_ref()
            .and_then(|boots| boots.nbt.as_ref())
            .map_or(0, |nbt| enchantment_level(nbt, "depth_strider", data));
        let elytra_equipped = entity
            .chestplate
            .as_ref()
            .is_some_and(|item| item.name == "elytra");

        Self {
            pos: entity.pos,
            vel: entity.vel,
            yaw: entity.yaw,
            pitch: entity.pitch,
            control,
            on_ground: entity.on_ground,
            is_in_water: entity.is_in_water,
            is_in_lava: entity.is_in_lava,
            is_in_web: entity.is_in_web,
            is_collided_horizontally: entity.is_collided_horizontally,
            is_collided_vertically: entity.is_collided_vertically,
            elytra_flying: entity.elytra_flying,
            jump_ticks: entity.jump_ticks,
            jump_queued: entity.jump_queued,
            firework_rocket_duration: entity.firework_rocket_duration,
            jump_boost: effect_level(&entity.effects, "JumpBoost", data),
            speed: effect_level(&entity.effects, "Speed", data),
            slowness: effect_level(&entity.effects, "Slowness", data),
            dolphins_grace: effect_level(&entity.effects, "DolphinsGrace", data),
            slow_falling: effect_level(&entity.effects, "SlowFalling", data),
            levitation: effect_level(&entity.effects, "Levitation", data),
            depth_strider,
            elytra_equipped,
            attributes: entity.attributes.clone(),
        }
    }

    /// Write the mutable fields back into the host's view.
    pub fn apply_to(&self, entity: &mut EntitySnapshot) {
        entity.pos = self.pos;
        entity.vel = self.vel;
        entity.on_ground = self.on_ground;
        entity.is_in_water = self.is_in_water;
        entity.is_in_lava = self.is_in_lava;
        entity.is_in_web = self.is_in_web;
        entity.is_collided_horizontally = self.is_collided_horizontally;
        entity.is_collided_vertically = self.is_collided_vertically;
        entity.elytra_flying = self.elytra_flying;
        entity.jump_ticks = self.jump_ticks;
        entity.jump_queued = self.jump_queued;
        entity.firework_rocket_duration = self.firework_rocket_duration;
    }

    pub(crate) fn strafe_input(&self) -> f64 {
        f64::from(u8::from(self.control.right)) - f64::from(u8::from(self.control.left))
    }

    pub(crate) fn forward_input(&self) -> f64 {
        f64::from(u8::from(self.control.forward)) - f64::from(u8::from(self.control.back))
    }
}

fn effect_level(effects: &[ActiveEffect], name: &str, data: &impl GameData) -> u32 {
    let Some(id) = data.effect_id(name) else {
        return 0;
    };
    effects
        .iter()
        .find(|e| e.id == id)
        .map_or(0, |e| e.amplifier + 1)
}

/// Reads the modern `Enchantments` list, falling back to the legacy `ench`
/// list. String ids match by substring, numeric ids through the registry.
fn enchantment_level(nbt: &Compound, name: &str, data: &impl GameData) -> u32 {
    let Some(registry_id) = data.enchantment_id(name) else {
        return 0;
    };
    let entries = match nbt.get("Enchantments").or_else(|| nbt.get("ench")) {
        Some(Value::List(List::Compound(entries))) => entries,
        _ => return 0,
    };
    for entry in entries {
        let level = entry.get("lvl").and_then(nbt_int).unwrap_or(0).max(0) as u32;
        match entry.get("id") {
            Some(Value::String(id)) if id.contains(name) => return level,
            Some(id) if nbt_int(id) == Some(i64::from(registry_id)) => return level,
            _ => {}
        }
    }
    0
}

fn nbt_int(value: &Value) -> Option<i64> {
    match value {
        Value::Byte(n) => Some(i64::from(*n)),
        Value::Short(n) => Some(i64::from(*n)),
        Value::Int(n) => Some(i64::from(*n)),
        Value::Long(n) => Some(*n),
        _ => None,
    }
}
