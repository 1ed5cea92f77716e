//! Action selection - exploration plus need-weighted exploitation

use rand::Rng;

use crate::actions::ActionKind;
use crate::entity::character::Traits;
use crate::learning::values::Learner;

/// What the learner may look at when choosing
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    pub health: f64,
    /// Absolute health below which food actions get boosted
    pub low_health_threshold: f64,
    pub wood: u32,
    pub food: u32,
    pub traits: &'a Traits,
}

/// Wood below which chopping is favoured
const LOW_WOOD: u32 = 3;
/// Wood at which building is favoured
const BUILD_WOOD: u32 = 5;

impl Learner {
    /// Table values scaled by the current needs and personality, before
    /// jitter
    pub fn weighted_scores(&self, ctx: &SelectionContext) -> [f64; ActionKind::COUNT] {
        let mut scores = *self.values();
        let traits = ctx.traits;

        if ctx.health < ctx.low_health_threshold {
            scores[ActionKind::HarvestFood.index()] *= 1.5 * traits.gatherer;
            scores[ActionKind::FarmFood.index()] *= 1.3 * traits.farmer;
        }

        if ctx.wood < LOW_WOOD {
            scores[ActionKind::ChopTree.index()] *= 1.2 * traits.gatherer;
        }

        if ctx.wood >= BUILD_WOOD {
            scores[ActionKind::BuildHouse.index()] *= 1.2 * traits.builder;
        }

        if ctx.food >= 1 {
            scores[ActionKind::FarmFood.index()] *= 1.1 * traits.farmer;
        }

        scores
    }

    /// Pick the next action.
    ///
    /// Decays exploration first; then explores uniformly with probability
    /// equal to the exploration rate, otherwise returns the highest jittered
    /// weighted score. Remaining ties go to the earlier action.
    pub fn choose_action(&mut self, ctx: &SelectionContext, rng: &mut impl Rng) -> ActionKind {
        self.decay_exploration();

        if rng.gen::<f64>() < self.exploration() {
            return ActionKind::ALL[rng.gen_range(0..ActionKind::COUNT)];
        }

        let jitter = self.params().score_jitter;
        let mut scores = self.weighted_scores(ctx);
        if jitter > 0.0 {
            for score in scores.iter_mut() {
                *score += rng.gen_range(0.0..jitter);
            }
        }

        let mut best = ActionKind::ALL[0];
        let mut best_score = scores[0];
        for action in ActionKind::ALL.iter().skip(1) {
            if scores[action.index()] > best_score {
                best = *action;
                best_score = scores[action.index()];
            }
        }
        best
    }
}
