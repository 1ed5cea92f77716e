//! Resource regeneration - trees and food regrow on a timer

use crate::actions::ResourceKind;
use crate::simulation::events::SimulationEvent;
use crate::world::World;

/// Advance the regrowth timer. Every `regen_interval` ticks one tree and one
/// food may appear, each only while its position list is below its maximum
/// and its global counter is below its cap.
pub fn regenerate_resources(world: &mut World, events: &mut Vec<SimulationEvent>) {
    world.regen_timer += 1;
    if world.regen_timer < world.config.world.regen_interval {
        return;
    }
    world.regen_timer = 0;

    if world.trees.len() < world.config.world.max_trees
        && world.counters.is_below_cap(ResourceKind::Wood)
    {
        let position = world.random_field_position();
        world.trees.push(position);
        world.counters.increment(ResourceKind::Wood);
        events.push(SimulationEvent::TreeGrown { position });
        tracing::trace!(x = position.x, y = position.y, trees = world.trees.len(), "tree grown");
    }

    if world.food_sources.len() < world.config.world.max_food
        && world.counters.is_below_cap(ResourceKind::Food)
    {
        let position = world.random_field_position();
        world.food_sources.push(position);
        world.counters.increment(ResourceKind::Food);
        events.push(SimulationEvent::FoodGrown { position });
        tracing::trace!(x = position.x, y = position.y, food = world.food_sources.len(), "food grown");
    }
}
