//! Session configuration.

use serde::{Deserialize, Serialize};

/// Deepest tree the generator will materialize.
///
/// The arena holds `2^(depth+1) - 1` nodes, so this caps memory at a few
/// million nodes.
pub const MAX_TREE_DEPTH: usize = 20;

/// Configuration for a search session.
///
/// All parameters are immutable for the session's lifetime; `reset`
/// re-derives a fresh tree from the same configuration.
///
/// # Examples
///
/// ```
/// use treeseek::SessionConfig;
///
/// let config = SessionConfig::new()
///     .with_depth(8)
///     .with_patience_penalty(0.5)
///     .with_cognitive_slowness(5)
///     .with_seed(42);
/// assert_eq!(config.search_tree_depth, 8);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Levels of the search tree below the root.
    pub search_tree_depth: usize,

    /// Fixed penalty charged on every step, encouraging short episodes.
    pub patience_penalty: f64,

    /// Steps of examination needed before the current node reads exactly.
    ///
    /// Also fixes the sibling noise at `cognitive_slowness + 1`.
    pub cognitive_slowness: u32,

    /// Step count at which the episode is forcibly ended.
    pub max_episode_steps: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Create a configuration with the standard defaults.
    pub fn new() -> Self {
        Self {
            search_tree_depth: 4,
            patience_penalty: 1.0,
            cognitive_slowness: 3,
            max_episode_steps: 1000,
            seed: None,
        }
    }

    /// Set the tree depth.
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.search_tree_depth = depth;
        self
    }

    /// Set the per-step penalty.
    pub fn with_patience_penalty(mut self, penalty: f64) -> Self {
        self.patience_penalty = penalty;
        self
    }

    /// Set the cognitive slowness.
    ///
    /// Zero is a documented edge case: the current node always reads
    /// exactly and siblings carry unit noise.
    pub fn with_cognitive_slowness(mut self, slowness: u32) -> Self {
        self.cognitive_slowness = slowness;
        self
    }

    /// Set the forced episode cutoff.
    pub fn with_max_episode_steps(mut self, max_steps: usize) -> Self {
        self.max_episode_steps = max_steps;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the configuration for contract violations.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the penalty is
    /// not finite, the depth exceeds [`MAX_TREE_DEPTH`], or the step cap
    /// is zero.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if !self.patience_penalty.is_finite() {
            return Err(crate::Error::InvalidConfiguration {
                message: format!("patience_penalty must be finite, got {}", self.patience_penalty),
            });
        }
        if self.search_tree_depth > MAX_TREE_DEPTH {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "search_tree_depth {} exceeds maximum {MAX_TREE_DEPTH}",
                    self.search_tree_depth
                ),
            });
        }
        if self.max_episode_steps == 0 {
            return Err(crate::Error::InvalidConfiguration {
                message: "max_episode_steps must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}
