pub mod character;
pub mod house;
pub mod inventory;
pub mod monster;
pub mod movement;
pub mod stats;

pub use character::{Character, Traits};
pub use house::House;
pub use inventory::Inventory;
pub use monster::Monster;
pub use movement::{ActionState, StepOutcome};
pub use stats::CombatStats;
