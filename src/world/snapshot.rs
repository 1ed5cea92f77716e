//! Serializable snapshot of world state

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::actions::{ActionKind, ResourceKind};
use crate::core::error::Result;
use crate::core::types::{Tick, Vec2};
use crate::entity::{Character, House, Monster};
use crate::world::World;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub game_over: bool,
    pub game_speed: u32,
    pub wood_count: u32,
    pub food_count: u32,
    pub trees: usize,
    pub food_sources: usize,
    pub farm_plots: usize,
    pub houses: Vec<House>,
    pub characters: Vec<CharacterSnapshot>,
    pub monsters: Vec<MonsterSnapshot>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterSnapshot {
    pub name: String,
    pub position: Vec2,
    pub state: String,
    pub current_action: Option<ActionKind>,
    pub health: f64,
    pub max_health: f64,
    pub level: u32,
    pub experience: u32,
    pub inventory: BTreeMap<String, u32>,
    pub values: BTreeMap<String, f64>,
    pub exploration: f64,
    pub total_reward: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MonsterSnapshot {
    pub level: u32,
    pub position: Vec2,
    pub health: f64,
    pub max_health: f64,
}

impl From<&Character> for CharacterSnapshot {
    fn from(c: &Character) -> Self {
        Self {
            name: c.name.clone(),
            position: c.position,
            state: c.state.label().to_string(),
            current_action: c.current_action,
            health: c.health,
            max_health: c.max_health,
            level: c.stats.level,
            experience: c.stats.experience,
            inventory: ResourceKind::ALL
                .iter()
                .map(|r| (r.to_string(), c.inventory.get(*r)))
                .collect(),
            values: ActionKind::ALL
                .iter()
                .map(|a| (a.to_string(), c.learner.value(*a)))
                .collect(),
            exploration: c.learner.exploration(),
            total_reward: c.learner.total_reward(),
        }
    }
}

impl From<&Monster> for MonsterSnapshot {
    fn from(m: &Monster) -> Self {
        Self {
            level: m.level,
            position: m.position,
            health: m.health,
            max_health: m.max_health,
        }
    }
}

impl WorldSnapshot {
    pub fn capture(world: &World) -> Self {
        Self {
            tick: world.current_tick,
            game_over: world.game_over,
            game_speed: world.game_speed,
            wood_count: world.counters.wood,
            food_count: world.counters.food,
            trees: world.trees.len(),
            food_sources: world.food_sources.len(),
            farm_plots: world.farm_plots.len(),
            houses: world.houses.clone(),
            characters: world.characters.iter().map(CharacterSnapshot::from).collect(),
            monsters: world.monsters.iter().map(MonsterSnapshot::from).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// One-line status, as printed by the headless runner
    pub fn summary(&self) -> String {
        let houses_by_level = |level: u32| self.houses.iter().filter(|h| h.level == level).count();
        format!(
            "tick {:>6} | villagers {} | monsters {} | wood {:>3} food {:>3} | trees {:>2} food sources {:>2} | houses {} (Lv2 {}, Lv3 {}) | farms {}",
            self.tick,
            self.characters.len(),
            self.monsters.len(),
            self.wood_count,
            self.food_count,
            self.trees,
            self.food_sources,
            self.houses.len(),
            houses_by_level(2),
            houses_by_level(3),
            self.farm_plots,
        )
    }
}
