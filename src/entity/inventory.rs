//! Inventory - per-character resource storage

use serde::{Deserialize, Serialize};

use crate::actions::ResourceKind;

/// Resource counts keyed by `ResourceKind`.
///
/// Every kind is present from creation; counts are unsigned so they can
/// never go negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    counts: [u32; ResourceKind::COUNT],
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current amount of a resource
    pub fn get(&self, resource: ResourceKind) -> u32 {
        self.counts[resource.index()]
    }

    pub fn has(&self, resource: ResourceKind, amount: u32) -> bool {
        self.get(resource) >= amount
    }

    pub fn add(&mut self, resource: ResourceKind, amount: u32) {
        let slot = &mut self.counts[resource.index()];
        *slot = slot.saturating_add(amount);
    }

    /// Remove `amount` if available; returns false and leaves the count
    /// untouched otherwise
    pub fn try_remove(&mut self, resource: ResourceKind, amount: u32) -> bool {
        let slot = &mut self.counts[resource.index()];
        if *slot < amount {
            return false;
        }
        *slot -= amount;
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL.iter().map(move |r| (*r, self.get(*r)))
    }
}
