//! Action-value table and its one-step update

use ordered_float::OrderedFloat;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;
use crate::core::config::LearnerConfig;

/// Per-character tabular learner over `ActionKind`.
///
/// The table is a fixed array so it always holds exactly one value per
/// action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Learner {
    values: [f64; ActionKind::COUNT],
    exploration: f64,
    params: LearnerConfig,
    last_action: Option<ActionKind>,
    last_reward: f64,
    total_reward: f64,
    updates: u64,
}

impl Learner {
    /// Learner with values drawn uniformly from the configured initial range
    pub fn new(params: &LearnerConfig, rng: &mut impl Rng) -> Self {
        let mut values = [0.0; ActionKind::COUNT];
        for v in values.iter_mut() {
            *v = if params.initial_value_max > params.initial_value_min {
                rng.gen_range(params.initial_value_min..params.initial_value_max)
            } else {
                params.initial_value_min
            };
        }
        Self::with_values(params, values)
    }

    /// Learner with an explicit starting table
    pub fn with_values(params: &LearnerConfig, values: [f64; ActionKind::COUNT]) -> Self {
        Self {
            values,
            exploration: params.initial_exploration,
            params: params.clone(),
            last_action: None,
            last_reward: 0.0,
            total_reward: 0.0,
            updates: 0,
        }
    }

    pub fn value(&self, action: ActionKind) -> f64 {
        self.values[action.index()]
    }

    pub fn values(&self) -> &[f64; ActionKind::COUNT] {
        &self.values
    }

    pub fn exploration(&self) -> f64 {
        self.exploration
    }

    pub fn params(&self) -> &LearnerConfig {
        &self.params
    }

    pub fn last_action(&self) -> Option<ActionKind> {
        self.last_action
    }

    pub fn last_reward(&self) -> f64 {
        self.last_reward
    }

    /// Sum of every reward seen (diagnostics only)
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Largest value in the table
    pub fn max_value(&self) -> f64 {
        self.values
            .iter()
            .copied()
            .map(OrderedFloat)
            .max()
            .map(|v| v.0)
            .unwrap_or(0.0)
    }

    /// Multiplicative exploration decay, clamped to the minimum
    pub(crate) fn decay_exploration(&mut self) {
        self.exploration =
            (self.exploration * self.params.exploration_decay).max(self.params.min_exploration);
    }

    /// One-step update of the acted-on entry:
    /// `new = (1 - α) * old + α * (reward + γ * max(table))`.
    ///
    /// The maximum is read before the write and includes the entry itself.
    /// Returns the stored value.
    pub fn learn(&mut self, action: ActionKind, reward: f64) -> f64 {
        let alpha = self.params.learning_rate;
        let gamma = self.params.discount_factor;

        let old_value = self.values[action.index()];
        let next_max = self.max_value();
        let new_value = (1.0 - alpha) * old_value + alpha * (reward + gamma * next_max);

        self.values[action.index()] = new_value;
        self.last_action = Some(action);
        self.last_reward = reward;
        self.total_reward += reward;
        self.updates += 1;
        new_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn learner(values: [f64; 4]) -> Learner {
        Learner::with_values(&LearnerConfig::default(), values)
    }

    #[test]
    fn test_initial_values_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let l = Learner::new(&LearnerConfig::default(), &mut rng);
        for v in l.values() {
            assert!((0.1..0.3).contains(v));
        }
        assert!((l.exploration() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_learn_formula() {
        let mut l = learner([0.2, 0.5, 0.1, 0.3]);
        // (1 - 0.1) * 0.1 + 0.1 * (10 + 0.95 * 0.5)
        let expected = 0.9 * 0.1 + 0.1 * (10.0 + 0.95 * 0.5);
        let got = l.learn(ActionKind::BuildHouse, 10.0);
        assert!((got - expected).abs() < 1e-12);
        assert!((l.value(ActionKind::BuildHouse) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_learn_bootstraps_on_own_entry() {
        let mut l = learner([0.2, 0.1, 0.1, 0.1]);
        let expected = 0.9 * 0.2 + 0.1 * (0.0 + 0.95 * 0.2);
        let got = l.learn(ActionKind::ChopTree, 0.0);
        assert!((got - expected).abs() < 1e-12);
    }

    #[test]
    fn test_learn_changes_only_acted_entry() {
        let mut l = learner([0.2, 0.25, 0.15, 0.3]);
        let before = *l.values();
        l.learn(ActionKind::HarvestFood, -2.0);
        for action in ActionKind::ALL {
            if action == ActionKind::HarvestFood {
                assert_ne!(l.value(action), before[action.index()]);
            } else {
                assert_eq!(l.value(action), before[action.index()]);
            }
        }
    }

    #[test]
    fn test_learn_records_bookkeeping() {
        let mut l = learner([0.1; 4]);
        l.learn(ActionKind::FarmFood, 8.0);
        l.learn(ActionKind::BuildHouse, -1.0);
        assert_eq!(l.last_action(), Some(ActionKind::BuildHouse));
        assert_eq!(l.last_reward(), -1.0);
        assert!((l.total_reward() - 7.0).abs() < 1e-12);
        assert_eq!(l.updates(), 2);
    }

    #[test]
    fn test_exploration_decays_to_floor() {
        let mut l = learner([0.1; 4]);
        let mut previous = l.exploration();
        for _ in 0..20_000 {
            l.decay_exploration();
            assert!(l.exploration() <= previous);
            previous = l.exploration();
        }
        assert!((l.exploration() - 0.05).abs() < 1e-12);
    }
}
