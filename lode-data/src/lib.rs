pub mod catalogue;
pub mod features;
pub mod version;

pub use catalogue::{BlockCatalogue, CatalogueError};
pub use features::{Feature, FeatureSet, VersionCondition};
pub use version::{GameVersion, VersionError};

/// Per-version id registry the host resolves names through. Mirrors the
/// lookup tables a protocol layer keeps per supported version.
pub trait GameData {
    fn block_id(&self, name: &str) -> Option<u32>;
    fn effect_id(&self, name: &str) -> Option<u32>;
    fn enchantment_id(&self, name: &str) -> Option<u32>;
    /// Canonical resource key of the movement-speed attribute, e.g.
    /// `minecraft:generic.movement_speed` on modern versions.
    fn movement_speed_key(&self) -> &str;
}
