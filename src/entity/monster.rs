//! Monsters - periodically spawned hostiles that grow stronger with time

use serde::{Deserialize, Serialize};

use crate::core::config::CombatConfig;
use crate::core::types::{MonsterId, Tick, Vec2};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Monster {
    pub id: MonsterId,
    pub position: Vec2,
    pub level: u32,
    pub health: f64,
    pub max_health: f64,
    pub damage: f64,
    pub speed: f64,
    pub attack_range: f64,
    pub attack_cooldown: u32,
    pub cooldown_remaining: u32,
}

/// Monster level for a given elapsed game time: one level per
/// `ticks_per_level`, starting at 1
pub fn monster_level(game_time: Tick, ticks_per_level: u64) -> u32 {
    1 + (game_time / ticks_per_level.max(1)) as u32
}

impl Monster {
    /// Spawn a monster whose stats are scaled by the level reached at
    /// `game_time`. Stats stay fixed for the monster's lifetime.
    pub fn spawn(id: MonsterId, position: Vec2, game_time: Tick, config: &CombatConfig) -> Self {
        let level = monster_level(game_time, config.ticks_per_level);
        let l = level as f64;
        let max_health = 10.0 + 5.0 * l;
        Self {
            id,
            position,
            level,
            health: max_health,
            max_health,
            damage: 3.0 + 2.0 * l,
            speed: 1.5 + 0.5 * l,
            attack_range: config.monster_attack_range,
            attack_cooldown: config.monster_attack_cooldown,
            cooldown_remaining: 0,
        }
    }

    /// Walk toward `target`, stopping once within one step of it
    pub fn move_towards(&mut self, target: Vec2) {
        if self.position.distance(&target) > self.speed {
            self.position.step_toward(target, self.speed);
        }
    }

    pub fn in_range(&self, target: Vec2) -> bool {
        self.position.distance(&target) <= self.attack_range
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

    pub fn take_damage(&mut self, amount: f64) {
        self.health = (self.health - amount).max(0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_game_time() {
        assert_eq!(monster_level(0, 3600), 1);
        assert_eq!(monster_level(3599, 3600), 1);
        assert_eq!(monster_level(3600, 3600), 2);
        assert_eq!(monster_level(10_800, 3600), 4);
    }

    #[test]
    fn test_stats_scale_with_level() {
        let config = CombatConfig::default();
        let m = Monster::spawn(MonsterId(0), Vec2::default(), 7200, &config);
        assert_eq!(m.level, 3);
        assert_eq!(m.max_health, 25.0);
        assert_eq!(m.health, 25.0);
        assert_eq!(m.damage, 9.0);
        assert_eq!(m.speed, 3.0);
    }

    #[test]
    fn test_first_minute_monster() {
        let m = Monster::spawn(MonsterId(1), Vec2::default(), 0, &CombatConfig::default());
        assert_eq!(m.max_health, 15.0);
        assert_eq!(m.damage, 5.0);
    }

    #[test]
    fn test_moves_until_within_one_step() {
        let mut m = Monster::spawn(MonsterId(2), Vec2::new(0.0, 0.0), 0, &CombatConfig::default());
        m.move_towards(Vec2::new(10.0, 0.0));
        assert!((m.position.x - 2.0).abs() < 1e-9);
        m.position = Vec2::new(9.0, 0.0);
        m.move_towards(Vec2::new(10.0, 0.0));
        assert_eq!(m.position.x, 9.0);
    }

    #[test]
    fn test_damage_and_death() {
        let mut m = Monster::spawn(MonsterId(3), Vec2::default(), 0, &CombatConfig::default());
        m.take_damage(10.0);
        assert!(!m.is_dead());
        m.take_damage(10.0);
        assert!(m.is_dead());
        assert_eq!(m.health, 0.0);
    }
}
