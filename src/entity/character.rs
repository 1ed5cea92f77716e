//! Characters - the villagers the simulation is about

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::{ActionKind, ResourceKind};
use crate::core::config::{CombatConfig, SimulationConfig};
use crate::core::types::{CharacterId, Color, Vec2};
use crate::entity::inventory::Inventory;
use crate::entity::movement::ActionState;
use crate::entity::stats::CombatStats;
use crate::learning::{Learner, SelectionContext};

/// Health at or below this counts as zero, so accumulated rounding in the
/// per-tick decay cannot keep a starving character alive an extra tick
const HEALTH_EPSILON: f64 = 1e-6;

/// Personality multipliers biasing action selection, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Traits {
    pub gatherer: f64,
    pub builder: f64,
    pub farmer: f64,
}

impl Traits {
    pub fn random(min: f64, max: f64, rng: &mut impl Rng) -> Self {
        let mut roll = || if max > min { rng.gen_range(min..=max) } else { min };
        Self {
            gatherer: roll(),
            builder: roll(),
            farmer: roll(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub color: Color,
    pub position: Vec2,
    pub state: ActionState,
    /// Action being carried out; kept after completion until the next decision
    pub current_action: Option<ActionKind>,

    pub health: f64,
    pub max_health: f64,
    pub health_decay: f64,
    pub health_per_food: f64,
    pub low_health_threshold: f64,

    pub base_speed: f64,
    pub gathering_duration: u32,

    pub inventory: Inventory,
    pub learner: Learner,
    pub traits: Traits,
    pub stats: CombatStats,
    pub alive: bool,
}

impl Character {
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        position: Vec2,
        color: Color,
        config: &SimulationConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let c = &config.character;
        Self {
            id,
            name: name.into(),
            color,
            position,
            state: ActionState::Idle,
            current_action: None,
            health: c.max_health,
            max_health: c.max_health,
            health_decay: c.health_decay,
            health_per_food: c.health_per_food,
            low_health_threshold: c.low_health_threshold,
            base_speed: c.base_speed,
            gathering_duration: c.gathering_duration,
            inventory: Inventory::new(),
            learner: Learner::new(&config.learner, rng),
            traits: Traits::random(c.trait_min, c.trait_max, rng),
            stats: CombatStats::new(&config.combat),
            alive: true,
        }
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        self.health / self.max_health
    }

    /// Share of max health currently missing, in [0, 1]
    pub fn missing_health_fraction(&self) -> f64 {
        1.0 - self.health_fraction()
    }

    /// Per-tick starvation. Marks the character dead at zero.
    pub fn decay_health(&mut self) {
        self.set_health(self.health - self.health_decay);
    }

    /// Restore health up to the cap
    pub fn heal(&mut self, amount: f64) {
        if self.alive {
            self.set_health(self.health + amount);
        }
    }

    pub fn take_damage(&mut self, amount: f64) {
        self.set_health(self.health - amount);
    }

    fn set_health(&mut self, value: f64) {
        self.health = value.clamp(0.0, self.max_health);
        if self.health <= HEALTH_EPSILON {
            self.health = 0.0;
            self.alive = false;
        }
    }

    /// Ask the learner for the next action given current needs
    pub fn choose_action(&mut self, rng: &mut impl Rng) -> ActionKind {
        let ctx = SelectionContext {
            health: self.health,
            low_health_threshold: self.low_health_threshold,
            wood: self.inventory.get(ResourceKind::Wood),
            food: self.inventory.get(ResourceKind::Food),
            traits: &self.traits,
        };
        self.learner.choose_action(&ctx, rng)
    }

    /// Add experience; each level gained also raises max health.
    /// Returns levels gained.
    pub fn gain_experience(&mut self, amount: u32, config: &CombatConfig) -> u32 {
        let gained = self.stats.gain_experience(amount, config);
        if gained > 0 {
            self.max_health += config.level_up_health * gained as f64;
        }
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn character() -> Character {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        Character::new(
            CharacterId(1),
            "Alice",
            Vec2::new(200.0, 400.0),
            Color(100, 255, 100),
            &SimulationConfig::default(),
            &mut rng,
        )
    }

    #[test]
    fn test_new_character_defaults() {
        let c = character();
        assert_eq!(c.health, 100.0);
        assert!(c.alive);
        assert!(c.state.is_idle());
        assert_eq!(c.stats.level, 1);
        for t in [c.traits.gatherer, c.traits.builder, c.traits.farmer] {
            assert!((0.8..=1.2).contains(&t));
        }
    }

    #[test]
    fn test_decay_to_death_after_5000_ticks() {
        let mut c = character();
        for _ in 0..4999 {
            c.decay_health();
        }
        assert!(c.alive);
        assert!(c.health > 0.0);
        c.decay_health();
        assert_eq!(c.health, 0.0);
        assert!(!c.alive);
    }

    #[test]
    fn test_heal_is_capped() {
        let mut c = character();
        c.health = 90.0;
        c.heal(30.0);
        assert_eq!(c.health, 100.0);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let mut c = character();
        c.take_damage(250.0);
        assert_eq!(c.health, 0.0);
        assert!(!c.alive);
        c.heal(10.0);
        assert_eq!(c.health, 0.0);
    }

    #[test]
    fn test_missing_health_fraction() {
        let mut c = character();
        c.health = 25.0;
        assert!((c.missing_health_fraction() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_level_up_raises_max_health() {
        let mut c = character();
        let config = CombatConfig::default();
        assert_eq!(c.gain_experience(3, &config), 1);
        assert_eq!(c.max_health, 110.0);
        assert_eq!(c.stats.level, 2);
    }
}
