//! Housing - building, upgrading and healing near houses

use ordered_float::OrderedFloat;

use crate::actions::ResourceKind;
use crate::entity::House;
use crate::simulation::events::SimulationEvent;
use crate::world::World;

/// Build a house where the character at `idx` stands.
///
/// Needs `wood_cost` wood and no house within `min_house_distance`. A
/// successful build then tries to upgrade the closest older house within
/// `upgrade_radius` with the builder's remaining wood. Always returns the
/// reward to learn from.
pub fn build_house(world: &mut World, idx: usize, events: &mut Vec<SimulationEvent>) -> f64 {
    let houses_cfg = world.config.houses.clone();
    let rewards = world.config.rewards.clone();
    let character = &mut world.characters[idx];
    let pos = character.position;

    if !character.inventory.has(ResourceKind::Wood, houses_cfg.wood_cost) {
        return rewards.invalid_action_penalty;
    }

    if world
        .houses
        .iter()
        .any(|h| h.position.distance(&pos) < houses_cfg.min_house_distance)
    {
        if world.house_warning_cooldown == 0 {
            events.push(SimulationEvent::HouseTooClose {
                character: character.name.clone(),
                position: pos,
            });
            world.house_warning_cooldown = houses_cfg.warning_cooldown;
        }
        return rewards.invalid_action_penalty;
    }

    character.inventory.try_remove(ResourceKind::Wood, houses_cfg.wood_cost);
    character.inventory.add(ResourceKind::House, 1);
    world.houses.push(House::new(pos));
    events.push(SimulationEvent::HouseBuilt {
        character: character.name.clone(),
        position: pos,
    });
    tracing::info!(character = %character.name, x = pos.x, y = pos.y, houses = world.houses.len(), "house built");

    let mut reward = rewards.build_reward;

    let older = world.houses.len() - 1;
    let nearby = world.houses[..older]
        .iter_mut()
        .filter(|h| h.can_upgrade() && h.position.distance(&pos) <= houses_cfg.upgrade_radius)
        .min_by_key(|h| OrderedFloat(h.position.distance(&pos)));

    if let Some(house) = nearby {
        if let Some(cost) = house.next_upgrade_cost() {
            if character.inventory.try_remove(ResourceKind::Wood, cost) {
                house.upgrade();
                reward += rewards.upgrade_reward;
                events.push(SimulationEvent::HouseUpgraded {
                    position: house.position,
                    level: house.level,
                });
                tracing::info!(character = %character.name, level = house.level, "house upgraded");
            }
        }
    }

    reward
}

/// Heal every living character standing near a house, then count down the
/// "too close" warning cooldown
pub fn apply_house_healing(world: &mut World) {
    let radius = world.config.houses.healing_radius;
    let houses = &world.houses;

    for character in world.characters.iter_mut().filter(|c| c.alive) {
        let nearest = houses
            .iter()
            .map(|h| (h, h.position.distance(&character.position)))
            .filter(|(_, d)| *d <= radius)
            .min_by_key(|(_, d)| OrderedFloat(*d));
        if let Some((house, _)) = nearest {
            character.heal(house.healing_rate());
        }
    }

    world.house_warning_cooldown = world.house_warning_cooldown.saturating_sub(1);
}
