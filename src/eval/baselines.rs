//! Scripted baseline policies.
//!
//! None of these learn; they exist to exercise the environment and to
//! give externally trained agents a floor to beat.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    ports::Policy,
    types::{Action, Observation},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Uniform random policy.
pub struct RandomPolicy {
    rng: StdRng,
    name: String,
}

impl RandomPolicy {
    /// Create a new random policy.
    pub fn new() -> Self {
        Self {
            rng: build_rng(None),
            name: "Random".to_string(),
        }
    }

    /// Seed the policy for deterministic rollouts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: &Observation) -> Action {
        *Action::ALL
            .choose(&mut self.rng)
            .expect("action alphabet is non-empty")
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Greedy descent on the fuzzy readings.
///
/// Moves to whichever child reads higher than the current node, and ends
/// the search once neither does. The missing-child sentinel reads as -1,
/// so leaves always look worse and the policy ends there. With small
/// exploration probability it takes a random step instead, which keeps it
/// from locking onto a noisy first impression.
pub struct GreedyPolicy {
    rng: StdRng,
    exploration: f64,
    name: String,
}

impl GreedyPolicy {
    /// Create a greedy policy with the default 5% exploration.
    pub fn new() -> Self {
        Self {
            rng: build_rng(None),
            exploration: 0.05,
            name: "Greedy".to_string(),
        }
    }

    /// Set the probability of taking a uniform random action.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration.clamp(0.0, 1.0);
        self
    }

    /// Seed the policy for deterministic rollouts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl Default for GreedyPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for GreedyPolicy {
    fn select_action(&mut self, observation: &Observation) -> Action {
        if self.exploration > 0.0 && self.rng.random::<f64>() < self.exploration {
            return *Action::ALL
                .choose(&mut self.rng)
                .expect("action alphabet is non-empty");
        }

        let best_child = observation.left.max(observation.right);
        if best_child > observation.current {
            if observation.left >= observation.right {
                Action::Left
            } else {
                Action::Right
            }
        } else {
            Action::End
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

/// Greedy descent that examines each node before trusting its reading.
///
/// Dwells (`Stay`) until the current reading has sharpened, then decides
/// like [`GreedyPolicy`] without exploration. The dwell count should
/// match the session's cognitive slowness; more buys nothing once the
/// timer is at zero.
pub struct DwellPolicy {
    dwell: u32,
    examined: u32,
    name: String,
}

impl DwellPolicy {
    /// Create a policy that examines `dwell` times at every node visited.
    pub fn new(dwell: u32) -> Self {
        Self {
            dwell,
            examined: 0,
            name: "Dwell".to_string(),
        }
    }
}

impl Policy for DwellPolicy {
    fn select_action(&mut self, observation: &Observation) -> Action {
        if self.examined < self.dwell {
            self.examined += 1;
            return Action::Stay;
        }

        let best_child = observation.left.max(observation.right);
        if best_child > observation.current {
            self.examined = 0;
            if observation.left >= observation.right {
                Action::Left
            } else {
                Action::Right
            }
        } else {
            Action::End
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn begin_episode(&mut self) {
        self.examined = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_observation(current: f64) -> Observation {
        Observation {
            current,
            left: Observation::NO_CHILD,
            right: Observation::NO_CHILD,
        }
    }

    #[test]
    fn test_random_policy_is_reproducible() {
        let obs = leaf_observation(50.0);
        let mut a = RandomPolicy::new().with_seed(4);
        let mut b = RandomPolicy::new().with_seed(4);
        for _ in 0..20 {
            assert_eq!(a.select_action(&obs), b.select_action(&obs));
        }
    }

    #[test]
    fn test_greedy_descends_toward_better_child() {
        let mut policy = GreedyPolicy::new().with_exploration(0.0);
        let obs = Observation {
            current: 50.0,
            left: 55.0,
            right: 61.0,
        };
        assert_eq!(policy.select_action(&obs), Action::Right);

        let obs = Observation {
            current: 50.0,
            left: 58.0,
            right: 52.0,
        };
        assert_eq!(policy.select_action(&obs), Action::Left);
    }

    #[test]
    fn test_greedy_ends_at_apparent_peak() {
        let mut policy = GreedyPolicy::new().with_exploration(0.0);
        let obs = Observation {
            current: 60.0,
            left: 55.0,
            right: 52.0,
        };
        assert_eq!(policy.select_action(&obs), Action::End);

        // Sentinel children always lose to a realistic current reading.
        assert_eq!(policy.select_action(&leaf_observation(42.0)), Action::End);
    }

    #[test]
    fn test_dwell_examines_before_deciding() {
        let mut policy = DwellPolicy::new(3);
        policy.begin_episode();
        let obs = Observation {
            current: 50.0,
            left: 57.0,
            right: 51.0,
        };
        assert_eq!(policy.select_action(&obs), Action::Stay);
        assert_eq!(policy.select_action(&obs), Action::Stay);
        assert_eq!(policy.select_action(&obs), Action::Stay);
        assert_eq!(policy.select_action(&obs), Action::Left);

        // The counter restarts after a move.
        assert_eq!(policy.select_action(&obs), Action::Stay);
    }
}
