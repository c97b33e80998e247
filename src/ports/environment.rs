//! Environment port - the step/reset interaction contract.

use crate::{
    error::Result,
    types::{Observation, StepResult},
};

/// Step/reset interaction contract consumed by a training harness.
///
/// Inspired by classic frameworks like OpenAI Gym: each call to [`step`]
/// applies one discrete action and returns the new observation, a scalar
/// reward, and the termination flags. The harness may run many
/// independent instances in parallel; each instance's internal state is
/// exclusive to that instance, hence the `Send` bound and the absence of
/// any shared-state hooks.
///
/// [`step`]: Environment::step
pub trait Environment: Send {
    /// Start a fresh episode and return the initial observation.
    ///
    /// Passing a seed makes the episode reproducible; without one the
    /// instance's existing random stream continues.
    fn reset(&mut self, seed: Option<u64>) -> Observation;

    /// Apply one action by its contract index.
    ///
    /// # Errors
    ///
    /// Returns an error for out-of-range action indices and for steps
    /// taken after termination without an intervening reset.
    fn step(&mut self, action: usize) -> Result<StepResult>;

    /// Dimensionality of the observation vector.
    fn observation_size(&self) -> usize;

    /// Number of discrete actions.
    fn action_size(&self) -> usize;
}
