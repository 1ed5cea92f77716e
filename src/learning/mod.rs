//! Tabular action-value learning
//!
//! Each character owns a `Learner`: a value per `ActionKind`, an exploration
//! rate that decays every decision, and a one-step update that bootstraps
//! against the table maximum.

pub mod select;
pub mod values;

pub use select::SelectionContext;
pub use values::Learner;
