//! Action execution - starting, continuing and resolving character actions
//!
//! `perform_action` is the single entry point. An idle character starts the
//! action; a busy one advances its state machine and, when gathering
//! finishes, the outcome is resolved against the world as it is *now*: a
//! tree or food taken by someone else in the meantime yields a zero reward.
//!
//! The learner is updated for every terminal or rejected outcome. A start
//! that only sets the character walking or gathering is not an outcome.

use crate::actions::{ActionCategory, ActionKind, ResourceKind};
use crate::core::types::{nearest_index, Vec2};
use crate::entity::StepOutcome;
use crate::simulation::events::SimulationEvent;
use crate::simulation::housing::build_house;
use crate::world::World;

/// Run `action` for the character at `idx` and return the reward it earned
/// this tick (0 while an action is still in progress).
pub fn perform_action(
    world: &mut World,
    idx: usize,
    action: ActionKind,
    events: &mut Vec<SimulationEvent>,
) -> f64 {
    let Some(character) = world.characters.get(idx) else {
        return 0.0;
    };
    if !character.alive {
        return 0.0;
    }

    if character.state.is_idle() {
        start_action(world, idx, action, events)
    } else {
        continue_action(world, idx, action, events)
    }
}

fn start_action(
    world: &mut World,
    idx: usize,
    action: ActionKind,
    events: &mut Vec<SimulationEvent>,
) -> f64 {
    world.characters[idx].current_action = Some(action);

    let outcome = match action.category() {
        ActionCategory::Gather(resource) => start_gathering(world, idx, resource),
        ActionCategory::Build => Some(build_house(world, idx, events)),
        ActionCategory::Cultivate => start_farming(world, idx),
    };

    match outcome {
        Some(reward) => resolve(world, idx, action, reward),
        None => {
            let c = &world.characters[idx];
            tracing::trace!(character = %c.name, %action, state = c.state.label(), "action started");
            0.0
        }
    }
}

/// Positions of the world sources of `resource`
fn sources_mut(world: &mut World, resource: ResourceKind) -> &mut Vec<Vec2> {
    match resource {
        ResourceKind::Wood => &mut world.trees,
        _ => &mut world.food_sources,
    }
}

/// Walk to the nearest matching resource. `None` once walking.
fn start_gathering(world: &mut World, idx: usize, resource: ResourceKind) -> Option<f64> {
    let from = world.characters[idx].position;
    let sources = sources_mut(world, resource);
    match nearest_index(from, sources).map(|i| sources[i]) {
        Some(target) => {
            world.characters[idx].begin_moving(target);
            None
        }
        None => Some(world.config.rewards.no_target_penalty),
    }
}

/// Farm where the character stands; needs one food to sow
fn start_farming(world: &mut World, idx: usize) -> Option<f64> {
    let character = &mut world.characters[idx];
    if character.inventory.has(ResourceKind::Food, 1) {
        character.begin_gathering_here();
        None
    } else {
        Some(world.config.rewards.invalid_action_penalty)
    }
}

fn continue_action(
    world: &mut World,
    idx: usize,
    action: ActionKind,
    events: &mut Vec<SimulationEvent>,
) -> f64 {
    let StepOutcome::Completed { target } = world.characters[idx].advance() else {
        return 0.0;
    };

    let reward = match action.category() {
        ActionCategory::Gather(resource) => complete_gathering(world, idx, resource, target, events),
        ActionCategory::Cultivate => complete_farming(world, idx, target, events),
        // Building resolves when started and never leaves Idle
        ActionCategory::Build => return 0.0,
    };
    resolve(world, idx, action, reward)
}

/// Take the resource at `target` if it is still there
fn complete_gathering(
    world: &mut World,
    idx: usize,
    resource: ResourceKind,
    target: Vec2,
    events: &mut Vec<SimulationEvent>,
) -> f64 {
    let sources = sources_mut(world, resource);
    let Some(slot) = sources.iter().position(|p| *p == target) else {
        events.push(SimulationEvent::TargetVanished {
            character: world.characters[idx].name.clone(),
            resource,
            position: target,
        });
        return 0.0;
    };
    sources.remove(slot);
    world.counters.decrement(resource);
    let character = &mut world.characters[idx];
    character.inventory.add(resource, 1);

    let rewards = &world.config.rewards;
    let missing = character.missing_health_fraction();
    let reward = match resource {
        ResourceKind::Wood => rewards.chop_base - rewards.chop_health_penalty * missing,
        _ => {
            let amount = character.health_per_food;
            character.heal(amount);
            rewards.harvest_base + rewards.harvest_hunger_bonus * missing
        }
    };

    events.push(SimulationEvent::ResourceGathered {
        character: character.name.clone(),
        resource,
        position: target,
    });
    reward
}

/// One food sown becomes two; the plot is remembered
fn complete_farming(
    world: &mut World,
    idx: usize,
    target: Vec2,
    events: &mut Vec<SimulationEvent>,
) -> f64 {
    let character = &mut world.characters[idx];
    if !character.inventory.try_remove(ResourceKind::Food, 1) {
        return 0.0;
    }
    character.inventory.add(ResourceKind::Food, 2);
    character.inventory.add(ResourceKind::Farm, 1);
    world.farm_plots.push(target);

    events.push(SimulationEvent::Farmed {
        character: character.name.clone(),
        position: target,
    });
    world.config.rewards.farm_reward
}

/// Feed the reward to the learner and log it
fn resolve(world: &mut World, idx: usize, action: ActionKind, reward: f64) -> f64 {
    let character = &mut world.characters[idx];
    character.learner.learn(action, reward);
    tracing::debug!(
        character = %character.name,
        %action,
        reward,
        value = character.learner.value(action),
        "action resolved"
    );
    reward
}
