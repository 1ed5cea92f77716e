pub mod action_execute;
pub mod combat;
pub mod events;
pub mod housing;
pub mod regeneration;
pub mod tick;

pub use action_execute::perform_action;
pub use events::{FloatingText, FloatingTextLayer, SimulationEvent};
pub use tick::{run_frame, run_simulation_tick};
