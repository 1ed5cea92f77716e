//! World state - everything the simulation step reads and writes
//!
//! A single struct owns the village: counters, resource positions, houses,
//! characters, monsters, timers and the seeded RNG. The simulation functions
//! in `crate::simulation` take `&mut World`; the shell reads the public fields
//! and writes only through `plant_tree`, `plant_food` and the game-speed
//! methods.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::actions::ResourceKind;
use crate::core::config::SimulationConfig;
use crate::core::error::{Result, VillageError};
use crate::core::types::{CharacterId, Color, MonsterId, Tick, Vec2};
use crate::entity::{Character, House, Monster};
use crate::simulation::events::SimulationEvent;

/// Global Wood and Food tallies shown by the shell. Each is kept in
/// `[0, cap]`; they track supply, not the length of the position lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceCounters {
    pub wood: u32,
    pub food: u32,
    pub wood_cap: u32,
    pub food_cap: u32,
}

impl ResourceCounters {
    pub fn is_below_cap(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Wood => self.wood < self.wood_cap,
            ResourceKind::Food => self.food < self.food_cap,
            _ => false,
        }
    }

    /// Increment, saturating at the cap
    pub fn increment(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Wood => self.wood = (self.wood + 1).min(self.wood_cap),
            ResourceKind::Food => self.food = (self.food + 1).min(self.food_cap),
            _ => {}
        }
    }

    /// Decrement, saturating at zero
    pub fn decrement(&mut self, kind: ResourceKind) {
        match kind {
            ResourceKind::Wood => self.wood = self.wood.saturating_sub(1),
            ResourceKind::Food => self.food = self.food.saturating_sub(1),
            _ => {}
        }
    }
}

/// The village
pub struct World {
    pub config: SimulationConfig,
    pub rng: ChaCha8Rng,

    pub counters: ResourceCounters,
    pub trees: Vec<Vec2>,
    pub food_sources: Vec<Vec2>,
    pub farm_plots: Vec<Vec2>,
    pub houses: Vec<House>,

    /// Active characters in insertion order; the dead are removed
    pub characters: Vec<Character>,
    pub monsters: Vec<Monster>,

    pub regen_timer: u64,
    pub monster_spawn_timer: u64,
    /// Ticks run so far; also the elapsed game time monsters scale with
    pub current_tick: Tick,
    /// Ticks left before another "too close" warning may be shown
    pub house_warning_cooldown: u32,

    /// Ticks run per frame, in [1, max_game_speed]
    pub game_speed: u32,
    pub game_over: bool,

    /// Events from shell actions, waiting to be drained
    pending_events: Vec<SimulationEvent>,
    next_character_id: u32,
    next_monster_id: u32,
}

impl World {
    /// Create a world with the configured initial trees and food. The config
    /// is assumed valid; `SimulationConfig::load` validates.
    pub fn new(config: SimulationConfig) -> Self {
        let w = &config.world;
        let counters = ResourceCounters {
            wood: w.initial_wood_count.min(w.wood_cap),
            food: w.initial_food_count.min(w.food_cap),
            wood_cap: w.wood_cap,
            food_cap: w.food_cap,
        };
        let seed = w.seed;
        let initial_trees = w.initial_trees;
        let initial_food = w.initial_food;

        let mut world = Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            counters,
            trees: Vec::with_capacity(initial_trees),
            food_sources: Vec::with_capacity(initial_food),
            farm_plots: Vec::new(),
            houses: Vec::new(),
            characters: Vec::new(),
            monsters: Vec::new(),
            regen_timer: 0,
            monster_spawn_timer: 0,
            current_tick: 0,
            house_warning_cooldown: 0,
            game_speed: 1,
            game_over: false,
            pending_events: Vec::new(),
            next_character_id: 0,
            next_monster_id: 0,
            config,
        };

        for _ in 0..initial_trees {
            let pos = world.random_field_position();
            world.trees.push(pos);
        }
        for _ in 0..initial_food {
            let pos = world.random_field_position();
            world.food_sources.push(pos);
        }
        world
    }

    /// Add a character at `position`
    pub fn spawn_character(
        &mut self,
        name: impl Into<String>,
        position: Vec2,
        color: Color,
    ) -> CharacterId {
        let id = CharacterId(self.next_character_id);
        self.next_character_id += 1;
        let character = Character::new(id, name, position, color, &self.config, &mut self.rng);
        self.characters.push(character);
        self.game_over = false;
        id
    }

    /// Add a character at a random point of the play field
    pub fn spawn_character_randomly(&mut self, name: impl Into<String>, color: Color) -> CharacterId {
        let position = self.random_field_position();
        self.spawn_character(name, position, color)
    }

    pub(crate) fn next_monster_id(&mut self) -> MonsterId {
        let id = MonsterId(self.next_monster_id);
        self.next_monster_id += 1;
        id
    }

    /// Uniform point inside the play field, inset by the spawn margin
    pub fn random_field_position(&mut self) -> Vec2 {
        let w = &self.config.world;
        let (x_min, x_max) = (w.spawn_margin, w.field_width - w.spawn_margin);
        let (y_min, y_max) = (w.field_top + w.spawn_margin, w.field_height - w.spawn_margin);
        let x = if x_max > x_min { self.rng.gen_range(x_min..=x_max) } else { x_min };
        let y = if y_max > y_min { self.rng.gen_range(y_min..=y_max) } else { y_min };
        Vec2::new(x, y)
    }

    /// Uniform point on one of the four edges of the play field
    pub fn random_edge_position(&mut self) -> Vec2 {
        let (width, top, height) = {
            let w = &self.config.world;
            (w.field_width, w.field_top, w.field_height)
        };
        match self.rng.gen_range(0..4) {
            0 => Vec2::new(self.rng.gen_range(0.0..=width), top),
            1 => Vec2::new(width, self.rng.gen_range(top..=height)),
            2 => Vec2::new(self.rng.gen_range(0.0..=width), height),
            _ => Vec2::new(0.0, self.rng.gen_range(top..=height)),
        }
    }

    /// Whether `pos` lies in the walkable play field
    pub fn in_field(&self, pos: Vec2) -> bool {
        let w = &self.config.world;
        (0.0..=w.field_width).contains(&pos.x) && (w.field_top..=w.field_height).contains(&pos.y)
    }

    /// Centre of the play field
    pub fn field_center(&self) -> Vec2 {
        let w = &self.config.world;
        Vec2::new(w.field_width / 2.0, (w.field_top + w.field_height) / 2.0)
    }

    /// Shell action: plant a tree at `pos`
    pub fn plant_tree(&mut self, pos: Vec2) -> Result<()> {
        if !self.in_field(pos) {
            return Err(VillageError::OutOfBounds(pos));
        }
        self.trees.push(pos);
        self.counters.increment(ResourceKind::Wood);
        self.pending_events.push(SimulationEvent::TreePlanted { position: pos });
        tracing::debug!(x = pos.x, y = pos.y, "tree planted");
        Ok(())
    }

    /// Shell action: plant food at `pos`
    pub fn plant_food(&mut self, pos: Vec2) -> Result<()> {
        if !self.in_field(pos) {
            return Err(VillageError::OutOfBounds(pos));
        }
        self.food_sources.push(pos);
        self.counters.increment(ResourceKind::Food);
        self.pending_events.push(SimulationEvent::FoodPlanted { position: pos });
        tracing::debug!(x = pos.x, y = pos.y, "food planted");
        Ok(())
    }

    /// Set ticks per frame, clamped to [1, max_game_speed]
    pub fn set_game_speed(&mut self, speed: u32) {
        self.game_speed = speed.clamp(1, self.config.world.max_game_speed.max(1));
    }

    /// Step the game speed 1 -> 2 -> ... -> max -> 1
    pub fn cycle_game_speed(&mut self) -> u32 {
        let max = self.config.world.max_game_speed.max(1);
        self.game_speed = self.game_speed % max + 1;
        let position = self.field_center();
        self.pending_events.push(SimulationEvent::GameSpeedChanged {
            speed: self.game_speed,
            position,
        });
        self.game_speed
    }

    /// Take the events queued by shell actions
    pub fn drain_events(&mut self) -> Vec<SimulationEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn is_decision_tick(&self) -> bool {
        self.current_tick % self.config.world.decision_interval.max(1) == 0
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
