//! Combat stats and experience for characters

use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatStats {
    pub level: u32,
    pub experience: u32,
    pub attack_damage: f64,
    pub attack_range: f64,
    pub attack_cooldown: u32,
    pub cooldown_remaining: u32,
}

impl CombatStats {
    pub fn new(config: &CombatConfig) -> Self {
        Self {
            level: 1,
            experience: 0,
            attack_damage: config.character_attack_damage,
            attack_range: config.character_attack_range,
            attack_cooldown: config.character_attack_cooldown,
            cooldown_remaining: 0,
        }
    }

    pub fn can_attack(&self) -> bool {
        self.cooldown_remaining == 0
    }

    pub fn tick_cooldown(&mut self) {
        self.cooldown_remaining = self.cooldown_remaining.saturating_sub(1);
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown_remaining = self.attack_cooldown;
    }

    /// Experience required to leave the current level
    pub fn experience_to_next(&self, per_level: u32) -> u32 {
        per_level.max(1) * self.level
    }

    /// Add experience and apply any level-ups. Returns levels gained.
    pub fn gain_experience(&mut self, amount: u32, config: &CombatConfig) -> u32 {
        self.experience += amount;
        let mut gained = 0;
        loop {
            let needed = self.experience_to_next(config.experience_per_level);
            if self.experience < needed {
                break;
            }
            self.experience -= needed;
            self.level += 1;
            self.attack_damage += config.level_up_attack;
            gained += 1;
        }
        gained
    }
}
