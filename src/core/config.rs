//! Tunable parameters of the village, grouped by subsystem
//!
//! The defaults reproduce the pacing of the 60-ticks-per-second village:
//! a decision every second, a regrowth every five seconds, a new monster
//! every ten seconds, and monsters gaining a level every minute.
//!
//! A config can be loaded from TOML. Every section and key is optional and
//! falls back to the default below.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, VillageError};

/// Configuration for the whole simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub character: CharacterConfig,
    pub learner: LearnerConfig,
    pub rewards: RewardConfig,
    pub houses: HouseConfig,
    pub combat: CombatConfig,
}

/// Play field, resource supply and pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed for the world RNG; the same seed replays the same village
    pub seed: u64,

    /// Play field extent. Everything above `field_top` belongs to the UI
    /// panels of a graphical shell and is never walked on.
    pub field_width: f64,
    pub field_height: f64,
    pub field_top: f64,

    /// Inset from the field edges for randomly placed trees and food
    pub spawn_margin: f64,

    /// Positions generated at world creation
    pub initial_trees: usize,
    pub initial_food: usize,

    /// Regeneration never grows the position lists beyond these
    pub max_trees: usize,
    pub max_food: usize,

    /// Global resource counters start here and are capped at the caps.
    /// The counters are what the UI shows; they are not the position counts.
    pub initial_wood_count: u32,
    pub initial_food_count: u32,
    pub wood_cap: u32,
    pub food_cap: u32,

    /// Ticks between regeneration attempts (300 = five seconds)
    pub regen_interval: u64,

    /// Idle characters pick a new action on every Nth tick
    pub decision_interval: u64,

    /// Upper bound for the ticks-per-frame multiplier
    pub max_game_speed: u32,

    /// Lifetime of a floating text in ticks
    pub floating_text_lifetime: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            field_width: 800.0,
            field_height: 700.0,
            field_top: 160.0,
            spawn_margin: 50.0,
            initial_trees: 20,
            initial_food: 10,
            max_trees: 20,
            max_food: 10,
            initial_wood_count: 100,
            initial_food_count: 50,
            wood_cap: 100,
            food_cap: 50,
            regen_interval: 300,
            decision_interval: 60,
            max_game_speed: 5,
            floating_text_lifetime: 60,
        }
    }
}

/// Health, movement and gathering of a single character
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub max_health: f64,

    /// Health lost every tick. At 0.02 an untended character starves
    /// after 5000 ticks (about 83 seconds).
    pub health_decay: f64,

    /// Health restored by eating one harvested food
    pub health_per_food: f64,

    /// Below this absolute health the learner favours food actions
    pub low_health_threshold: f64,

    /// Speed at full health is 1.5x this, at zero health 0.5x
    pub base_speed: f64,

    /// Ticks spent gathering after arriving at a target
    pub gathering_duration: u32,

    /// Personality multipliers are drawn from this range
    pub trait_min: f64,
    pub trait_max: f64,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            health_decay: 0.02,
            health_per_food: 30.0,
            low_health_threshold: 70.0,
            base_speed: 3.0,
            gathering_duration: 60,
            trait_min: 0.8,
            trait_max: 1.2,
        }
    }
}

/// Tabular action-value learner parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Step size α of the value update
    pub learning_rate: f64,
    /// Discount γ applied to the table maximum
    pub discount_factor: f64,

    /// Exploration starts here and decays multiplicatively per decision
    pub initial_exploration: f64,
    pub min_exploration: f64,
    pub exploration_decay: f64,

    /// Initial values are drawn uniformly from this range
    pub initial_value_min: f64,
    pub initial_value_max: f64,

    /// Upper bound of the uniform jitter added to every score
    pub score_jitter: f64,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount_factor: 0.95,
            initial_exploration: 0.2,
            min_exploration: 0.05,
            exploration_decay: 0.9995,
            initial_value_min: 0.1,
            initial_value_max: 0.3,
            score_jitter: 0.1,
        }
    }
}

/// Reward magnitudes fed back to the learner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardConfig {
    /// Gathering action chosen while no tree/food exists
    pub no_target_penalty: f64,
    /// Build or farm without the required inventory, or build too close
    pub invalid_action_penalty: f64,

    /// Chopping pays `chop_base - 2 * missing_health_fraction`
    pub chop_base: f64,
    pub chop_health_penalty: f64,

    /// Harvesting pays `harvest_base + 5 * missing_health_fraction`
    pub harvest_base: f64,
    pub harvest_hunger_bonus: f64,

    pub farm_reward: f64,
    pub build_reward: f64,
    pub upgrade_reward: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            no_target_penalty: -2.0,
            invalid_action_penalty: -1.0,
            chop_base: 5.0,
            chop_health_penalty: 2.0,
            harvest_base: 3.0,
            harvest_hunger_bonus: 5.0,
            farm_reward: 8.0,
            build_reward: 10.0,
            upgrade_reward: 15.0,
        }
    }
}

/// Building and healing rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseConfig {
    /// Wood spent on a new house
    pub wood_cost: u32,

    /// No house may be built closer than this to an existing one
    pub min_house_distance: f64,

    /// A freshly built house may pay to upgrade an older house this close
    pub upgrade_radius: f64,

    /// Characters within this distance of a house heal at its level's rate
    pub healing_radius: f64,

    /// Ticks between two "too close" warnings
    pub warning_cooldown: u32,
}

impl Default for HouseConfig {
    fn default() -> Self {
        Self {
            wood_cost: 5,
            min_house_distance: 80.0,
            upgrade_radius: 100.0,
            healing_radius: 50.0,
            warning_cooldown: 60,
        }
    }
}

/// Monster spawning and character combat
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub monsters_enabled: bool,
    pub monster_spawn_interval: u64,
    pub max_monsters: usize,

    /// Game time per monster level (3600 ticks = one minute)
    pub ticks_per_level: u64,

    pub monster_attack_range: f64,
    pub monster_attack_cooldown: u32,

    pub character_attack_damage: f64,
    pub character_attack_range: f64,
    pub character_attack_cooldown: u32,

    /// Characters within this distance of a slain monster share experience
    pub experience_radius: f64,
    /// Experience needed for the next level is `experience_per_level * level`
    pub experience_per_level: u32,
    pub level_up_attack: f64,
    pub level_up_health: f64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            monsters_enabled: true,
            monster_spawn_interval: 600,
            max_monsters: 5,
            ticks_per_level: 3600,
            monster_attack_range: 30.0,
            monster_attack_cooldown: 60,
            character_attack_damage: 5.0,
            character_attack_range: 40.0,
            character_attack_cooldown: 45,
            experience_radius: 150.0,
            experience_per_level: 3,
            level_up_attack: 2.0,
            level_up_health: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with a different world seed
    pub fn with_seed(seed: u64) -> Self {
        let mut config = Self::default();
        config.world.seed = seed;
        config
    }

    /// Parse a (possibly partial) TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let w = &self.world;
        if w.field_width <= 2.0 * w.spawn_margin
            || w.field_height - w.field_top <= 2.0 * w.spawn_margin
        {
            return Err(VillageError::Config(format!(
                "spawn_margin ({}) leaves no room inside a {}x{} field starting at y={}",
                w.spawn_margin, w.field_width, w.field_height, w.field_top
            )));
        }

        if w.regen_interval == 0 || w.decision_interval == 0 {
            return Err(VillageError::Config(
                "regen_interval and decision_interval must be positive".into(),
            ));
        }

        if w.max_game_speed == 0 {
            return Err(VillageError::Config("max_game_speed must be at least 1".into()));
        }

        let c = &self.character;
        if c.max_health <= 0.0 || c.health_decay < 0.0 {
            return Err(VillageError::Config(
                "max_health must be positive and health_decay non-negative".into(),
            ));
        }
        if c.trait_min > c.trait_max {
            return Err(VillageError::Config(format!(
                "trait_min ({}) should be <= trait_max ({})",
                c.trait_min, c.trait_max
            )));
        }

        let l = &self.learner;
        if !(0.0..=1.0).contains(&l.learning_rate) || !(0.0..=1.0).contains(&l.discount_factor) {
            return Err(VillageError::Config(
                "learning_rate and discount_factor must lie in [0, 1]".into(),
            ));
        }
        if l.min_exploration > l.initial_exploration {
            return Err(VillageError::Config(format!(
                "min_exploration ({}) should be <= initial_exploration ({})",
                l.min_exploration, l.initial_exploration
            )));
        }
        if !(0.0..=1.0).contains(&l.exploration_decay) {
            return Err(VillageError::Config("exploration_decay must lie in [0, 1]".into()));
        }
        if l.initial_value_min > l.initial_value_max || l.score_jitter < 0.0 {
            return Err(VillageError::Config(
                "initial value range is inverted or score_jitter is negative".into(),
            ));
        }

        if self.combat.monster_spawn_interval == 0 || self.combat.ticks_per_level == 0 {
            return Err(VillageError::Config(
                "monster_spawn_interval and ticks_per_level must be positive".into(),
            ));
        }

        Ok(())
    }
}
