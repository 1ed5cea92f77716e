//! Tick system - orchestrates simulation updates
//!
//! One call to `run_simulation_tick` is one step of the village:
//! health decay -> regrowth -> decisions or continuations -> house healing ->
//! monsters -> culling -> clock.
//!
//! Characters are processed in insertion order, so when two of them race for
//! the same tree the earlier one wins and the later one finds it gone.

use crate::simulation::action_execute::perform_action;
use crate::simulation::combat::update_monsters;
use crate::simulation::events::SimulationEvent;
use crate::simulation::housing::apply_house_healing;
use crate::simulation::regeneration::regenerate_resources;
use crate::world::World;

/// Run a single simulation tick
///
/// Order:
/// 1. Health decay for every character
/// 2. Resource regeneration
/// 3. On a decision tick, idle characters choose and start an action;
///    otherwise busy characters continue theirs
/// 4. House healing and the house-warning cooldown
/// 5. Monsters spawn, fight and pay out experience
/// 6. Dead characters are removed
/// 7. Clock advances; an empty village ends the game
///
/// Returns the events of this tick in the order they happened. A finished
/// game is left untouched.
pub fn run_simulation_tick(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = Vec::new();
    if world.game_over {
        return events;
    }

    decay_health(world);
    regenerate_resources(world, &mut events);

    if world.is_decision_tick() {
        make_decisions(world, &mut events);
    } else {
        continue_actions(world, &mut events);
    }

    apply_house_healing(world);
    update_monsters(world, &mut events);
    cull_dead(world, &mut events);

    world.current_tick += 1;

    if world.characters.is_empty() {
        world.game_over = true;
        events.push(SimulationEvent::GameOver { tick: world.current_tick });
        tracing::info!(tick = world.current_tick, "game over: no villagers remain");
    }

    events
}

/// Run `game_speed` ticks, as one rendered frame would. Events queued by
/// shell actions since the last frame come first.
pub fn run_frame(world: &mut World) -> Vec<SimulationEvent> {
    let mut events = world.drain_events();
    for _ in 0..world.game_speed {
        if world.game_over {
            break;
        }
        events.extend(run_simulation_tick(world));
    }
    events
}

fn decay_health(world: &mut World) {
    for character in world.characters.iter_mut().filter(|c| c.alive) {
        character.decay_health();
    }
}

/// Every living idle character picks an action and starts it
fn make_decisions(world: &mut World, events: &mut Vec<SimulationEvent>) {
    for idx in 0..world.characters.len() {
        let action = {
            let World { characters, rng, .. } = world;
            let character = &mut characters[idx];
            if !character.alive || !character.state.is_idle() {
                continue;
            }
            character.choose_action(rng)
        };
        perform_action(world, idx, action, events);
    }
}

/// Every living busy character advances its current action
fn continue_actions(world: &mut World, events: &mut Vec<SimulationEvent>) {
    for idx in 0..world.characters.len() {
        let character = &mut world.characters[idx];
        if !character.alive || character.state.is_idle() {
            continue;
        }
        let current = character.current_action;
        match current {
            Some(action) => {
                perform_action(world, idx, action, events);
            }
            None => character.reset_action_state(),
        }
    }
}

fn cull_dead(world: &mut World, events: &mut Vec<SimulationEvent>) {
    world.characters.retain(|c| {
        if c.alive {
            return true;
        }
        events.push(SimulationEvent::CharacterDied {
            character: c.name.clone(),
            position: c.position,
        });
        tracing::info!(character = %c.name, total_reward = c.learner.total_reward(), "character died");
        false
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;
    use crate::core::types::{Color, Vec2};

    fn quiet_config() -> SimulationConfig {
        let mut config = SimulationConfig::default();
        config.combat.monsters_enabled = false;
        config
    }

    #[test]
    fn test_clock_advances() {
        let mut world = World::new(quiet_config());
        world.spawn_character("A", Vec2::new(400.0, 400.0), Color::WHITE);
        for _ in 0..10 {
            run_simulation_tick(&mut world);
        }
        assert_eq!(world.current_tick, 10);
        assert!(!world.game_over);
    }

    #[test]
    fn test_first_tick_is_a_decision() {
        let mut world = World::new(quiet_config());
        world.spawn_character("A", Vec2::new(400.0, 400.0), Color::WHITE);
        run_simulation_tick(&mut world);
        assert!(world.characters[0].current_action.is_some());
    }

    #[test]
    fn test_empty_village_is_game_over() {
        let mut world = World::new(quiet_config());
        let events = run_simulation_tick(&mut world);
        assert!(world.game_over);
        assert!(matches!(events.last(), Some(SimulationEvent::GameOver { tick: 1 })));

        let events = run_simulation_tick(&mut world);
        assert!(events.is_empty());
        assert_eq!(world.current_tick, 1);
    }

    #[test]
    fn test_busy_character_without_action_goes_idle() {
        let mut world = World::new(quiet_config());
        world.spawn_character("A", Vec2::new(400.0, 400.0), Color::WHITE);
        world.current_tick = 1;
        world.characters[0].begin_moving(Vec2::new(600.0, 400.0));
        world.characters[0].current_action = None;

        run_simulation_tick(&mut world);
        assert!(world.characters[0].state.is_idle());
        assert_eq!(world.characters[0].position, Vec2::new(400.0, 400.0));
        assert_eq!(world.characters[0].learner.updates(), 0);
    }

    #[test]
    fn test_dead_characters_are_culled() {
        let mut world = World::new(quiet_config());
        world.spawn_character("A", Vec2::new(400.0, 400.0), Color::WHITE);
        world.spawn_character("B", Vec2::new(200.0, 400.0), Color::WHITE);
        world.characters[0].take_damage(1000.0);

        let events = run_simulation_tick(&mut world);
        assert_eq!(world.characters.len(), 1);
        assert_eq!(world.characters[0].name, "B");
        assert!(events.iter().any(
            |e| matches!(e, SimulationEvent::CharacterDied { character, .. } if character == "A")
        ));
    }

    #[test]
    fn test_frame_runs_game_speed_ticks() {
        let mut world = World::new(quiet_config());
        world.spawn_character("A", Vec2::new(400.0, 400.0), Color::WHITE);
        world.set_game_speed(4);
        world.plant_food(Vec2::new(300.0, 300.0)).unwrap();

        let events = run_frame(&mut world);
        assert_eq!(world.current_tick, 4);
        assert!(matches!(events.first(), Some(SimulationEvent::FoodPlanted { .. })));
    }
}
