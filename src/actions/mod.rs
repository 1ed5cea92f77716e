pub mod catalog;

pub use catalog::{ActionCategory, ActionKind, ResourceKind};
