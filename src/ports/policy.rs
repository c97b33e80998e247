//! Policy port - abstraction for action selection.

use crate::types::{Action, Observation};

/// Policy trait - unified interface for anything that picks actions.
///
/// Policies only ever see the fuzzy observation; ground truth reaches
/// them indirectly through reward. Implementations range from scripted
/// baselines ([`crate::eval::baselines`]) to adapters around externally
/// trained agents.
pub trait Policy: Send {
    /// Select the next action given the latest observation.
    fn select_action(&mut self, observation: &Observation) -> Action;

    /// Get the policy's name.
    ///
    /// Used for identification in reports and logging.
    fn name(&self) -> &str;

    /// Reset per-episode state.
    ///
    /// Called once at the start of every episode. Stateless policies can
    /// use the default no-op implementation.
    fn begin_episode(&mut self) {}

    /// Seed the policy's internal random number generator.
    ///
    /// Rollout runners call this when supplied with a deterministic seed.
    /// Deterministic policies can ignore it.
    fn set_rng_seed(&mut self, _seed: u64) {}
}
