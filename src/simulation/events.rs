//! Simulation events and the floating texts a shell draws for them
//!
//! The tick returns its events in order; the shell drains them and may turn
//! each into a short-lived `FloatingText`. Nothing in the simulation reads
//! them back.

use serde::{Deserialize, Serialize};

use crate::actions::ResourceKind;
use crate::core::types::{Color, MonsterId, Tick, Vec2};

/// Events generated during a simulation tick or by shell actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimulationEvent {
    TreeGrown { position: Vec2 },
    FoodGrown { position: Vec2 },
    TreePlanted { position: Vec2 },
    FoodPlanted { position: Vec2 },
    /// A character finished gathering and took the resource
    ResourceGathered {
        character: String,
        resource: ResourceKind,
        position: Vec2,
    },
    /// A character arrived but someone else had taken the resource first
    TargetVanished {
        character: String,
        resource: ResourceKind,
        position: Vec2,
    },
    Farmed { character: String, position: Vec2 },
    HouseBuilt { character: String, position: Vec2 },
    HouseUpgraded { position: Vec2, level: u32 },
    HouseTooClose { character: String, position: Vec2 },
    CharacterDied { character: String, position: Vec2 },
    MonsterSpawned { id: MonsterId, level: u32, position: Vec2 },
    CharacterDamaged { character: String, amount: f64, position: Vec2 },
    MonsterDamaged { id: MonsterId, amount: f64, position: Vec2 },
    MonsterDefeated { id: MonsterId, level: u32, position: Vec2 },
    ExperienceGained { character: String, amount: u32, position: Vec2 },
    LevelUp { character: String, level: u32, position: Vec2 },
    GameSpeedChanged { speed: u32, position: Vec2 },
    GameOver { tick: Tick },
}

impl SimulationEvent {
    /// Where a floating text for this event should appear
    pub fn position(&self) -> Option<Vec2> {
        use SimulationEvent::*;
        match self {
            TreeGrown { position }
            | FoodGrown { position }
            | TreePlanted { position }
            | FoodPlanted { position }
            | ResourceGathered { position, .. }
            | TargetVanished { position, .. }
            | Farmed { position, .. }
            | HouseBuilt { position, .. }
            | HouseUpgraded { position, .. }
            | HouseTooClose { position, .. }
            | CharacterDied { position, .. }
            | MonsterSpawned { position, .. }
            | CharacterDamaged { position, .. }
            | MonsterDamaged { position, .. }
            | MonsterDefeated { position, .. }
            | ExperienceGained { position, .. }
            | LevelUp { position, .. }
            | GameSpeedChanged { position, .. } => Some(*position),
            GameOver { .. } => None,
        }
    }

    /// Short human-readable text
    pub fn text(&self) -> String {
        use SimulationEvent::*;
        match self {
            TreeGrown { .. } => "New Tree".to_string(),
            FoodGrown { .. } => "New Food".to_string(),
            TreePlanted { .. } => "Tree Planted!".to_string(),
            FoodPlanted { .. } => "Food Planted!".to_string(),
            ResourceGathered { resource, .. } => format!("+1 {}", resource),
            TargetVanished { resource, .. } => format!("The {} is gone", resource),
            Farmed { .. } => "+1 food (farmed)".to_string(),
            HouseBuilt { .. } => "House Built!".to_string(),
            HouseUpgraded { level, .. } => format!("House Upgraded to Lv{}!", level),
            HouseTooClose { .. } => "Too close to other houses!".to_string(),
            CharacterDied { character, .. } => format!("{} has died!", character),
            MonsterSpawned { level, .. } => format!("A Lv{} monster appears!", level),
            CharacterDamaged { amount, .. } | MonsterDamaged { amount, .. } => {
                format!("-{:.0}", amount)
            }
            MonsterDefeated { .. } => "Monster defeated!".to_string(),
            ExperienceGained { amount, .. } => format!("+{} EXP", amount),
            LevelUp { character, level, .. } => format!("{} reached Lv{}!", character, level),
            GameSpeedChanged { speed, .. } => format!("Game Speed: {}x", speed),
            GameOver { .. } => "Game Over".to_string(),
        }
    }

    pub fn color(&self) -> Color {
        use SimulationEvent::*;
        match self {
            TreeGrown { .. } | TreePlanted { .. } | HouseBuilt { .. } => Color::GREEN,
            FoodGrown { .. } | FoodPlanted { .. } | Farmed { .. } | GameSpeedChanged { .. } => {
                Color::YELLOW
            }
            ResourceGathered { .. } | ExperienceGained { .. } => Color::WHITE,
            HouseUpgraded { .. } | LevelUp { .. } | MonsterDefeated { .. } => Color::GOLD,
            TargetVanished { .. } | MonsterDamaged { .. } => Color::ORANGE,
            HouseTooClose { .. } | CharacterDied { .. } | CharacterDamaged { .. } | GameOver { .. } => {
                Color::RED
            }
            MonsterSpawned { .. } => Color::PURPLE,
        }
    }

    /// Floating text for the shell, or None for events without a position
    pub fn to_floating_text(&self, lifetime: u32) -> Option<FloatingText> {
        self.position()
            .map(|pos| FloatingText::new(self.text(), pos, self.color(), lifetime))
    }
}

/// Cosmetic text that drifts upward and fades out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingText {
    pub text: String,
    pub position: Vec2,
    pub color: Color,
    pub lifetime: u32,
    pub y_offset: f64,
}

impl FloatingText {
    pub fn new(text: impl Into<String>, position: Vec2, color: Color, lifetime: u32) -> Self {
        Self {
            text: text.into(),
            position,
            color,
            lifetime,
            y_offset: 0.0,
        }
    }

    /// One frame: shorter life, one unit higher
    pub fn update(&mut self) {
        self.lifetime = self.lifetime.saturating_sub(1);
        self.y_offset -= 1.0;
    }

    pub fn is_expired(&self) -> bool {
        self.lifetime == 0
    }

    /// Opacity for drawing, 0..=255
    pub fn alpha(&self) -> u8 {
        (self.lifetime.saturating_mul(4)).min(255) as u8
    }
}

/// Shell-side collection of live floating texts
#[derive(Debug, Clone, Default)]
pub struct FloatingTextLayer {
    texts: Vec<FloatingText>,
    lifetime: u32,
}

impl FloatingTextLayer {
    pub fn new(lifetime: u32) -> Self {
        Self { texts: Vec::new(), lifetime }
    }

    pub fn extend<'a>(&mut self, events: impl IntoIterator<Item = &'a SimulationEvent>) {
        let lifetime = self.lifetime;
        self.texts
            .extend(events.into_iter().filter_map(|e| e.to_floating_text(lifetime)));
    }

    /// Age every text and drop the expired ones
    pub fn update(&mut self) {
        for text in &mut self.texts {
            text.update();
        }
        self.texts.retain(|t| !t.is_expired());
    }

    pub fn texts(&self) -> &[FloatingText] {
        &self.texts
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
