//! Action and resource definitions

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Everything a character can decide to do.
///
/// Closed set: the learner keeps exactly one value per variant, indexed by
/// `index()`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[display(fmt = "chop_tree")]
    ChopTree,
    #[display(fmt = "harvest_food")]
    HarvestFood,
    #[display(fmt = "build_house")]
    BuildHouse,
    #[display(fmt = "farm_food")]
    FarmFood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    /// Walk to a world resource, gather it, consume it
    Gather(ResourceKind),
    /// Resolved immediately where the character stands
    Build,
    /// Gathered in place without walking
    Cultivate,
}

impl ActionKind {
    pub const COUNT: usize = 4;

    /// All actions in enumeration order (also the tie-break order)
    pub const ALL: [ActionKind; Self::COUNT] = [
        ActionKind::ChopTree,
        ActionKind::HarvestFood,
        ActionKind::BuildHouse,
        ActionKind::FarmFood,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn category(&self) -> ActionCategory {
        match self {
            ActionKind::ChopTree => ActionCategory::Gather(ResourceKind::Wood),
            ActionKind::HarvestFood => ActionCategory::Gather(ResourceKind::Food),
            ActionKind::BuildHouse => ActionCategory::Build,
            ActionKind::FarmFood => ActionCategory::Cultivate,
        }
    }
}

/// Inventory and world resource keys
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    #[display(fmt = "wood")]
    Wood,
    #[display(fmt = "food")]
    Food,
    #[display(fmt = "house")]
    House,
    #[display(fmt = "farm")]
    Farm,
}

impl ResourceKind {
    pub const COUNT: usize = 4;

    pub const ALL: [ResourceKind; Self::COUNT] = [
        ResourceKind::Wood,
        ResourceKind::Food,
        ResourceKind::House,
        ResourceKind::Farm,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_match_enumeration_order() {
        for (i, action) in ActionKind::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
        }
        for (i, resource) in ResourceKind::ALL.iter().enumerate() {
            assert_eq!(resource.index(), i);
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ActionKind::ChopTree.to_string(), "chop_tree");
        assert_eq!(ActionKind::FarmFood.to_string(), "farm_food");
        assert_eq!(ResourceKind::Wood.to_string(), "wood");
    }

    #[test]
    fn test_categories() {
        assert_eq!(ActionKind::ChopTree.category(), ActionCategory::Gather(ResourceKind::Wood));
        assert_eq!(ActionKind::HarvestFood.category(), ActionCategory::Gather(ResourceKind::Food));
        assert_eq!(ActionKind::BuildHouse.category(), ActionCategory::Build);
        assert_eq!(ActionKind::FarmFood.category(), ActionCategory::Cultivate);
    }
}
