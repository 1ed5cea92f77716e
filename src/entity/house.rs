//! Houses - built from wood, upgraded in tiers, heal nearby characters

use serde::{Deserialize, Serialize};

use crate::core::types::Vec2;

pub const MAX_HOUSE_LEVEL: u32 = 3;

/// Wood needed to reach each level (index = target level)
const UPGRADE_COSTS: [Option<u32>; (MAX_HOUSE_LEVEL + 1) as usize] = [None, None, Some(8), Some(15)];

/// Health restored per tick at each level (index = level)
const HEALING_RATES: [f64; (MAX_HOUSE_LEVEL + 1) as usize] = [0.0, 0.05, 0.1, 0.2];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub position: Vec2,
    pub level: u32,
}

impl House {
    pub fn new(position: Vec2) -> Self {
        Self { position, level: 1 }
    }

    pub fn can_upgrade(&self) -> bool {
        self.level < MAX_HOUSE_LEVEL
    }

    /// Wood needed for the next tier, if there is one
    pub fn next_upgrade_cost(&self) -> Option<u32> {
        UPGRADE_COSTS.get(self.level as usize + 1).copied().flatten()
    }

    pub fn upgrade(&mut self) {
        if self.can_upgrade() {
            self.level += 1;
        }
    }

    pub fn healing_rate(&self) -> f64 {
        HEALING_RATES
            .get(self.level as usize)
            .copied()
            .unwrap_or(HEALING_RATES[MAX_HOUSE_LEVEL as usize])
    }
}
