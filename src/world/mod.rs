//! The village world and its snapshots

pub mod snapshot;
pub mod state;

pub use snapshot::{CharacterSnapshot, MonsterSnapshot, WorldSnapshot};
pub use state::{ResourceCounters, World};
