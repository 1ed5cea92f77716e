//! Monster spawning, fighting and experience
//!
//! Order within a tick: spawn, monsters move and strike, characters strike
//! back, defeated monsters are removed and pay out experience.

use ordered_float::OrderedFloat;

use crate::core::types::Vec2;
use crate::entity::Monster;
use crate::simulation::events::SimulationEvent;
use crate::world::World;

/// Run one tick of combat. Does nothing when monsters are disabled.
pub fn update_monsters(world: &mut World, events: &mut Vec<SimulationEvent>) {
    if !world.config.combat.monsters_enabled {
        return;
    }
    spawn_monsters(world, events);
    monsters_attack(world, events);
    characters_strike_back(world, events);
    remove_defeated_monsters(world, events);
}

/// Spawn a monster on the field edge every `monster_spawn_interval` ticks,
/// up to `max_monsters` alive at once
fn spawn_monsters(world: &mut World, events: &mut Vec<SimulationEvent>) {
    world.monster_spawn_timer += 1;
    if world.monster_spawn_timer < world.config.combat.monster_spawn_interval {
        return;
    }
    world.monster_spawn_timer = 0;

    if world.monsters.len() >= world.config.combat.max_monsters {
        return;
    }

    let position = world.random_edge_position();
    let id = world.next_monster_id();
    let monster = Monster::spawn(id, position, world.current_tick, &world.config.combat);
    tracing::info!(id = id.0, level = monster.level, x = position.x, y = position.y, "monster spawned");
    events.push(SimulationEvent::MonsterSpawned { id, level: monster.level, position });
    world.monsters.push(monster);
}

/// Each monster chases the nearest living character and hits it when in
/// range and off cooldown
fn monsters_attack(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let World { monsters, characters, .. } = world;

    for monster in monsters.iter_mut() {
        monster.tick_cooldown();

        let from = monster.position;
        let Some(target) = characters
            .iter_mut()
            .filter(|c| c.alive)
            .min_by_key(|c| OrderedFloat(c.position.distance(&from)))
        else {
            continue;
        };

        if !monster.in_range(target.position) {
            monster.move_towards(target.position);
        }
        if monster.in_range(target.position) && monster.can_attack() {
            target.take_damage(monster.damage);
            monster.start_cooldown();
            events.push(SimulationEvent::CharacterDamaged {
                character: target.name.clone(),
                amount: monster.damage,
                position: target.position,
            });
            tracing::debug!(monster = monster.id.0, character = %target.name, health = target.health, "character hit");
        }
    }
}

/// Living characters hit the nearest monster within their attack range
fn characters_strike_back(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let World { monsters, characters, .. } = world;

    for character in characters.iter_mut().filter(|c| c.alive) {
        character.stats.tick_cooldown();
        if !character.stats.can_attack() {
            continue;
        }

        let from = character.position;
        let range = character.stats.attack_range;
        let Some(monster) = monsters
            .iter_mut()
            .filter(|m| !m.is_dead() && m.position.distance(&from) <= range)
            .min_by_key(|m| OrderedFloat(m.position.distance(&from)))
        else {
            continue;
        };

        let damage = character.stats.attack_damage;
        monster.take_damage(damage);
        character.stats.start_cooldown();
        events.push(SimulationEvent::MonsterDamaged {
            id: monster.id,
            amount: damage,
            position: monster.position,
        });
    }
}

fn remove_defeated_monsters(world: &mut World, events: &mut Vec<SimulationEvent>) {
    let (defeated, remaining): (Vec<Monster>, Vec<Monster>) =
        std::mem::take(&mut world.monsters).into_iter().partition(|m| m.is_dead());
    world.monsters = remaining;

    for monster in defeated {
        events.push(SimulationEvent::MonsterDefeated {
            id: monster.id,
            level: monster.level,
            position: monster.position,
        });
        tracing::info!(id = monster.id.0, level = monster.level, "monster defeated");
        award_experience(world, monster.position, events);
    }
}

/// One experience point to every living character near `at`
fn award_experience(world: &mut World, at: Vec2, events: &mut Vec<SimulationEvent>) {
    let World { config, characters, .. } = world;
    let combat = &config.combat;

    for character in characters
        .iter_mut()
        .filter(|c| c.alive && c.position.distance(&at) <= combat.experience_radius)
    {
        let gained = character.gain_experience(1, combat);
        events.push(SimulationEvent::ExperienceGained {
            character: character.name.clone(),
            amount: 1,
            position: character.position,
        });
        if gained > 0 {
            events.push(SimulationEvent::LevelUp {
                character: character.name.clone(),
                level: character.stats.level,
                position: character.position,
            });
            tracing::info!(character = %character.name, level = character.stats.level, "level up");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::{Color, MonsterId};

    fn arena() -> World {
        let mut config = SimulationConfig::default();
        config.world.initial_trees = 0;
        config.world.initial_food = 0;
        let mut world = World::new(config);
        world.spawn_character("Cara", Vec2::new(400.0, 400.0), Color::WHITE);
        world
    }

    #[test]
    fn test_spawn_on_interval_up_to_cap() {
        let mut world = arena();
        world.characters.clear();
        let mut events = Vec::new();
        for _ in 0..600 * 7 {
            update_monsters(&mut world, &mut events);
        }
        assert_eq!(world.monsters.len(), 5);
        let spawned = events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::MonsterSpawned { .. }))
            .count();
        assert_eq!(spawned, 5);
    }

    #[test]
    fn test_disabled_monsters_never_spawn() {
        let mut world = arena();
        world.config.combat.monsters_enabled = false;
        let mut events = Vec::new();
        for _ in 0..1200 {
            update_monsters(&mut world, &mut events);
        }
        assert!(world.monsters.is_empty());
        assert_eq!(world.monster_spawn_timer, 0);
    }

    #[test]
    fn test_monster_in_range_hits_once_per_cooldown() {
        let mut world = arena();
        let config = world.config.combat.clone();
        world
            .monsters
            .push(Monster::spawn(MonsterId(0), Vec2::new(420.0, 400.0), 0, &config));
        // keep the character from killing it
        world.characters[0].stats.attack_range = 0.0;
        let mut events = Vec::new();

        update_monsters(&mut world, &mut events);
        assert_eq!(world.characters[0].health, 95.0);
        for _ in 0..59 {
            update_monsters(&mut world, &mut events);
        }
        assert_eq!(world.characters[0].health, 95.0);
        update_monsters(&mut world, &mut events);
        assert_eq!(world.characters[0].health, 90.0);
    }

    #[test]
    fn test_monster_walks_toward_character() {
        let mut world = arena();
        let config = world.config.combat.clone();
        world
            .monsters
            .push(Monster::spawn(MonsterId(0), Vec2::new(500.0, 400.0), 0, &config));
        let mut events = Vec::new();
        update_monsters(&mut world, &mut events);
        assert!((world.monsters[0].position.x - 498.0).abs() < 1e-9);
        assert_eq!(world.characters[0].health, 100.0);
    }

    #[test]
    fn test_defeat_grants_experience_and_level() {
        let mut world = arena();
        world.spawn_character("Far", Vec2::new(700.0, 650.0), Color::WHITE);
        let config = world.config.combat.clone();
        let mut monster = Monster::spawn(MonsterId(0), Vec2::new(430.0, 400.0), 0, &config);
        monster.health = 5.0;
        monster.cooldown_remaining = 100;
        world.monsters.push(monster);
        world.characters[0].stats.experience = 2;
        let mut events = Vec::new();

        update_monsters(&mut world, &mut events);

        assert!(world.monsters.is_empty());
        assert_eq!(world.characters[0].stats.level, 2);
        assert_eq!(world.characters[0].max_health, 110.0);
        assert_eq!(world.characters[1].stats.experience, 0);
        assert!(events.iter().any(|e| matches!(e, SimulationEvent::MonsterDefeated { .. })));
        assert!(events.iter().any(|e| matches!(e, SimulationEvent::LevelUp { level: 2, .. })));
    }
}
