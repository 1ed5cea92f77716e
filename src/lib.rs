//! Village Sim - villagers that learn to chop, harvest, farm and build
//!
//! A tick-driven village where each character owns a small action-value
//! table and learns from the rewards its actions earn. Monsters arrive over
//! time and grow stronger; characters fight back and level up.

pub mod actions;
pub mod core;
pub mod entity;
pub mod learning;
pub mod simulation;
pub mod world;
