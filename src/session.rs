//! The search session: navigation state machine, fuzzy perception, and
//! the reward/termination contract.

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    config::SessionConfig,
    error::Result,
    ports::Environment,
    tree::SearchTree,
    types::{Action, NodeId, Observation, StepResult, constants},
    utils::gaussian,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// One agent searching one randomly generated tree.
///
/// The session owns its tree, its position, and its RNG; nothing is shared,
/// so independent sessions can run on separate threads without
/// coordination. Each step is a synchronous request/response call.
///
/// Perception is noisy and time-decaying: the current node's reading
/// carries Gaussian noise whose standard deviation equals the remaining
/// `knowledge_timer`, so the reading sharpens as the agent examines the
/// node and becomes exact at zero. Children always read with fixed noise
/// `cognitive_slowness + 1`. Only the ground-truth value of the node the
/// agent ends on is scored.
#[derive(Debug, Clone)]
pub struct SearchSession {
    config: SessionConfig,
    tree: SearchTree,
    current: NodeId,
    knowledge_timer: u32,
    step_count: usize,
    terminated: bool,
    state: Observation,
    rng: StdRng,
}

impl SearchSession {
    /// Create a session and generate its first tree.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the configuration
    /// fails validation.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = build_rng(config.seed);
        let tree = SearchTree::generate(config.search_tree_depth, constants::ROOT_VALUE, &mut rng);
        let mut session = Self {
            knowledge_timer: config.cognitive_slowness,
            config,
            tree,
            current: NodeId::ROOT,
            step_count: 0,
            terminated: false,
            state: Observation {
                current: 0.0,
                left: Observation::NO_CHILD,
                right: Observation::NO_CHILD,
            },
            rng,
        };
        session.state = session.observe();
        Ok(session)
    }

    /// Start a fresh episode: regenerate the tree and return the initial
    /// observation.
    ///
    /// The previous tree is discarded, not reused. Passing a seed reseeds
    /// the session's RNG for reproducible episodes; without one the
    /// existing stream continues.
    pub fn reset(&mut self, seed: Option<u64>) -> Observation {
        if let Some(seed) = seed {
            self.rng = StdRng::seed_from_u64(seed);
        }
        self.tree = SearchTree::generate(
            self.config.search_tree_depth,
            constants::ROOT_VALUE,
            &mut self.rng,
        );
        self.current = NodeId::ROOT;
        self.knowledge_timer = self.config.cognitive_slowness;
        self.step_count = 0;
        self.terminated = false;
        self.state = self.observe();
        self.state
    }

    /// Advance the session by one action.
    ///
    /// Transition priority: an end condition (explicit [`Action::End`] or
    /// the step cap) short-circuits all movement; otherwise moves resolve,
    /// with invalid moves degrading to no-ops that still pay the per-step
    /// penalty.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EpisodeDone`] if the episode has already
    /// terminated and the session has not been reset.
    pub fn step(&mut self, action: Action) -> Result<StepResult> {
        if self.terminated {
            return Err(crate::Error::EpisodeDone);
        }

        self.step_count += 1;
        let mut reward = -self.config.patience_penalty;

        let terminated =
            action == Action::End || self.step_count >= self.config.max_episode_steps;
        if terminated {
            // Scored on the unnoised ground truth of the final node.
            reward += self.current_true_value();
        } else {
            match action {
                Action::Home => self.move_to(self.tree.root()),
                Action::Parent => {
                    if let Some(parent) = self.tree.node(self.current).parent() {
                        self.move_to(parent);
                    }
                }
                Action::Left => {
                    if let Some(left) = self.tree.node(self.current).left() {
                        self.move_to(left);
                    }
                }
                Action::Right => {
                    if let Some(right) = self.tree.node(self.current).right() {
                        self.move_to(right);
                    }
                }
                Action::Stay => {
                    if self.knowledge_timer > 0 {
                        self.knowledge_timer -= 1;
                    }
                }
                // End is handled by the terminal branch above.
                Action::End => {}
            }
        }

        self.terminated = terminated;
        self.state = self.observe();

        Ok(StepResult {
            observation: self.state,
            reward,
            terminated,
            truncated: false,
        })
    }

    /// Advance the session with a raw action index from the interaction
    /// contract.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAction`] for indices outside `0..6`
    /// and [`crate::Error::EpisodeDone`] for steps past termination.
    pub fn step_index(&mut self, action: usize) -> Result<StepResult> {
        self.step(Action::from_index(action)?)
    }

    /// Moving always resets knowledge freshness, even to the same node.
    fn move_to(&mut self, node: NodeId) {
        self.current = node;
        self.knowledge_timer = self.config.cognitive_slowness;
    }

    /// Draw a fresh fuzzy reading of the current surroundings.
    fn observe(&mut self) -> Observation {
        let node = self.tree.node(self.current);
        let current = gaussian(&mut self.rng, node.value(), f64::from(self.knowledge_timer));
        let sibling_noise = f64::from(self.config.cognitive_slowness + 1);

        let left = match node.left() {
            Some(id) => gaussian(&mut self.rng, self.tree.node(id).value(), sibling_noise),
            None => Observation::NO_CHILD,
        };
        let right = match node.right() {
            Some(id) => gaussian(&mut self.rng, self.tree.node(id).value(), sibling_noise),
            None => Observation::NO_CHILD,
        };

        Observation {
            current,
            left,
            right,
        }
    }

    /// The observation produced by the most recent step or reset.
    pub fn observation(&self) -> Observation {
        self.state
    }

    /// Ground truth of the current node.
    ///
    /// Diagnostic accessor for evaluation and logging; policies only ever
    /// see the fuzzy observation.
    pub fn current_true_value(&self) -> f64 {
        self.tree.node(self.current).value()
    }

    /// The agent's current position.
    pub fn current_node(&self) -> NodeId {
        self.current
    }

    /// Remaining examination steps before the current node reads exactly.
    pub fn knowledge_timer(&self) -> u32 {
        self.knowledge_timer
    }

    /// Steps taken in the current episode.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Whether the current episode has ended.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// The tree being searched this episode.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// The session's immutable configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl Environment for SearchSession {
    fn reset(&mut self, seed: Option<u64>) -> Observation {
        SearchSession::reset(self, seed)
    }

    fn step(&mut self, action: usize) -> Result<StepResult> {
        self.step_index(action)
    }

    fn observation_size(&self) -> usize {
        Observation::SIZE
    }

    fn action_size(&self) -> usize {
        Action::COUNT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_session(depth: usize) -> SearchSession {
        // cognitive_slowness 0 keeps the current reading exact.
        SearchSession::new(
            SessionConfig::new()
                .with_depth(depth)
                .with_cognitive_slowness(0)
                .with_seed(42),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let session = SearchSession::new(SessionConfig::new().with_seed(1)).unwrap();
        assert_eq!(session.current_node(), NodeId::ROOT);
        assert_eq!(session.knowledge_timer(), 3);
        assert_eq!(session.step_count(), 0);
        assert!(!session.is_terminated());
        assert_eq!(session.current_true_value(), constants::ROOT_VALUE);
    }

    #[test]
    fn test_movement_resets_freshness() {
        let mut session =
            SearchSession::new(SessionConfig::new().with_depth(2).with_seed(5)).unwrap();

        // Burn the timer down, then move.
        session.step(Action::Stay).unwrap();
        session.step(Action::Stay).unwrap();
        assert_eq!(session.knowledge_timer(), 1);

        session.step(Action::Left).unwrap();
        assert_eq!(session.knowledge_timer(), 3);

        session.step(Action::Stay).unwrap();
        session.step(Action::Parent).unwrap();
        assert_eq!(session.knowledge_timer(), 3);

        // Home from the root is a move to the same node and still resets.
        session.step(Action::Stay).unwrap();
        assert_eq!(session.knowledge_timer(), 2);
        session.step(Action::Home).unwrap();
        assert_eq!(session.knowledge_timer(), 3);
    }

    #[test]
    fn test_examine_monotonicity() {
        let mut session =
            SearchSession::new(SessionConfig::new().with_cognitive_slowness(3).with_seed(2))
                .unwrap();
        let mut timers = vec![session.knowledge_timer()];
        for _ in 0..5 {
            session.step(Action::Stay).unwrap();
            timers.push(session.knowledge_timer());
        }
        // Strictly decreasing until zero, then pinned at zero.
        assert_eq!(timers, vec![3, 2, 1, 0, 0, 0]);
    }

    #[test]
    fn test_no_op_moves_keep_position_and_charge_penalty() {
        let mut session = quiet_session(1);

        // Parent at the root is a no-op.
        let result = session.step(Action::Parent).unwrap();
        assert_eq!(session.current_node(), NodeId::ROOT);
        assert_eq!(result.reward, -1.0);

        // Child moves at a leaf are no-ops.
        session.step(Action::Left).unwrap();
        let leaf = session.current_node();
        let result = session.step(Action::Left).unwrap();
        assert_eq!(session.current_node(), leaf);
        assert_eq!(result.reward, -1.0);
        let result = session.step(Action::Right).unwrap();
        assert_eq!(session.current_node(), leaf);
        assert_eq!(result.reward, -1.0);
    }

    #[test]
    fn test_navigation_follows_tree_links() {
        let mut session = quiet_session(2);
        let root = session.current_node();
        let left = session.tree().node(root).left().unwrap();

        session.step(Action::Left).unwrap();
        assert_eq!(session.current_node(), left);

        let left_right = session.tree().node(left).right().unwrap();
        session.step(Action::Right).unwrap();
        assert_eq!(session.current_node(), left_right);

        session.step(Action::Parent).unwrap();
        assert_eq!(session.current_node(), left);

        session.step(Action::Home).unwrap();
        assert_eq!(session.current_node(), root);
    }

    #[test]
    fn test_end_reward_is_true_value_minus_penalty() {
        let mut session = quiet_session(3);
        session.step(Action::Left).unwrap();
        session.step(Action::Right).unwrap();
        let value = session.current_true_value();

        let result = session.step(Action::End).unwrap();
        assert!(result.terminated);
        assert!(!result.truncated);
        assert_eq!(result.reward, value - 1.0);
    }

    #[test]
    fn test_step_cap_folds_into_terminated() {
        let mut session = SearchSession::new(
            SessionConfig::new()
                .with_depth(0)
                .with_cognitive_slowness(0)
                .with_max_episode_steps(5)
                .with_seed(3),
        )
        .unwrap();

        for _ in 0..4 {
            let result = session.step(Action::Stay).unwrap();
            assert!(!result.terminated);
        }
        let result = session.step(Action::Stay).unwrap();
        assert!(result.terminated);
        assert!(!result.truncated);
        // Same reward formula as an explicit end at the current node.
        assert_eq!(result.reward, constants::ROOT_VALUE - 1.0);
    }

    #[test]
    fn test_end_condition_preempts_movement() {
        let mut session = SearchSession::new(
            SessionConfig::new()
                .with_depth(1)
                .with_max_episode_steps(1)
                .with_seed(8),
        )
        .unwrap();

        // The cap is reached on this very step, so the move must not happen.
        let result = session.step(Action::Left).unwrap();
        assert!(result.terminated);
        assert_eq!(session.current_node(), NodeId::ROOT);
    }

    #[test]
    fn test_step_after_termination_is_rejected() {
        let mut session = quiet_session(0);
        session.step(Action::End).unwrap();
        assert!(matches!(
            session.step(Action::Stay),
            Err(crate::Error::EpisodeDone)
        ));

        // Reset clears the terminal state.
        session.reset(None);
        assert!(session.step(Action::Stay).is_ok());
    }

    #[test]
    fn test_invalid_action_index_is_rejected() {
        let mut session = quiet_session(1);
        assert!(matches!(
            session.step_index(6),
            Err(crate::Error::InvalidAction { action: 6, .. })
        ));
        // The failed call must not consume a step.
        assert_eq!(session.step_count(), 0);
    }

    #[test]
    fn test_exact_reading_at_zero_timer() {
        let mut session = quiet_session(2);
        // Timer is already zero with slowness 0: reading is exact.
        assert_eq!(session.observation().current, session.current_true_value());

        session.step(Action::Right).unwrap();
        assert_eq!(session.observation().current, session.current_true_value());
    }

    #[test]
    fn test_leaf_observation_uses_sentinel() {
        let mut session = quiet_session(1);
        session.step(Action::Left).unwrap();
        let obs = session.observation();
        assert!(obs.left_is_missing());
        assert!(obs.right_is_missing());
    }

    #[test]
    fn test_reset_regenerates_tree() {
        let mut session =
            SearchSession::new(SessionConfig::new().with_depth(4).with_seed(10)).unwrap();
        let before = session.tree().clone();
        session.reset(None);
        // Same shape, fresh values.
        assert_eq!(session.tree().len(), before.len());
        assert_ne!(*session.tree(), before);
        assert_eq!(session.step_count(), 0);
        assert_eq!(session.current_node(), NodeId::ROOT);
    }

    #[test]
    fn test_seeded_reset_is_reproducible() {
        let mut a = SearchSession::new(SessionConfig::new().with_seed(1)).unwrap();
        let mut b = SearchSession::new(SessionConfig::new().with_seed(2)).unwrap();

        let obs_a = a.reset(Some(77));
        let obs_b = b.reset(Some(77));
        assert_eq!(obs_a, obs_b);

        for action in [Action::Left, Action::Stay, Action::Right, Action::Stay] {
            let ra = a.step(action).unwrap();
            let rb = b.step(action).unwrap();
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<SearchSession>();
    }
}
