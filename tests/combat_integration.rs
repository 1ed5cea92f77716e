//! Integration tests for monsters and experience

use village_sim::core::config::SimulationConfig;
use village_sim::core::types::{Color, MonsterId, Vec2};
use village_sim::entity::Monster;
use village_sim::simulation::combat::update_monsters;
use village_sim::simulation::{run_simulation_tick, SimulationEvent};
use village_sim::world::World;

fn empty_field() -> World {
    let mut config = SimulationConfig::with_seed(8);
    config.world.initial_trees = 0;
    config.world.initial_food = 0;
    World::new(config)
}

#[test]
fn test_monster_level_follows_game_time() {
    let mut world = empty_field();
    world.current_tick = 7200;
    world.monster_spawn_timer = 599;

    let mut events = Vec::new();
    update_monsters(&mut world, &mut events);

    assert_eq!(world.monsters.len(), 1);
    let m = &world.monsters[0];
    assert_eq!(m.level, 3);
    assert_eq!(m.max_health, 25.0);
    assert_eq!(m.damage, 9.0);
    assert_eq!(m.speed, 3.0);
    assert!(world.in_field(m.position));
    assert!(matches!(events[0], SimulationEvent::MonsterSpawned { level: 3, .. }));
}

#[test]
fn test_first_monster_arrives_after_ten_seconds() {
    let mut world = empty_field();
    world.spawn_character("Alice", Vec2::new(400.0, 400.0), Color::WHITE);

    let mut spawned_at = None;
    for _ in 0..700 {
        let tick = world.current_tick;
        let events = run_simulation_tick(&mut world);
        if spawned_at.is_none()
            && events.iter().any(|e| matches!(e, SimulationEvent::MonsterSpawned { .. }))
        {
            spawned_at = Some(tick);
        }
    }
    assert_eq!(spawned_at, Some(599));
}

#[test]
fn test_villagers_can_kill_a_weak_monster_together() {
    let mut world = empty_field();
    world.spawn_character("Alice", Vec2::new(400.0, 400.0), Color::WHITE);
    world.spawn_character("Bob", Vec2::new(410.0, 400.0), Color::WHITE);
    let config = world.config.combat.clone();
    world
        .monsters
        .push(Monster::spawn(MonsterId(100), Vec2::new(405.0, 420.0), 0, &config));

    let mut defeated = false;
    let mut exp_events = 0;
    for _ in 0..200 {
        let mut events = Vec::new();
        update_monsters(&mut world, &mut events);
        defeated |= events
            .iter()
            .any(|e| matches!(e, SimulationEvent::MonsterDefeated { id: MonsterId(100), .. }));
        exp_events += events
            .iter()
            .filter(|e| matches!(e, SimulationEvent::ExperienceGained { .. }))
            .count();
        if defeated {
            break;
        }
    }

    assert!(defeated);
    assert_eq!(exp_events, 2);
    assert!(world.characters.iter().all(|c| c.stats.experience == 1));
}

#[test]
fn test_monster_can_kill_a_villager() {
    let mut world = empty_field();
    world.spawn_character("Alice", Vec2::new(400.0, 400.0), Color::WHITE);
    world.characters[0].health = 4.0;
    world.characters[0].stats.attack_range = 0.0;
    let config = world.config.combat.clone();
    world
        .monsters
        .push(Monster::spawn(MonsterId(0), Vec2::new(410.0, 400.0), 0, &config));
    world.monster_spawn_timer = 0;

    let events = run_simulation_tick(&mut world);
    assert!(world.characters.is_empty());
    assert!(world.game_over);
    assert!(events.iter().any(|e| matches!(e, SimulationEvent::CharacterDamaged { .. })));
    assert!(events.iter().any(|e| matches!(e, SimulationEvent::CharacterDied { .. })));
}
