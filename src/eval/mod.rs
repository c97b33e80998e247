//! Evaluation of policies against the search environment.
//!
//! This is the in-repo consumer of the interaction contract: scripted
//! baseline policies and a rollout runner that aggregates episode
//! statistics. Learning itself happens outside this crate.

pub mod baselines;
pub mod rollout;

pub use baselines::{DwellPolicy, GreedyPolicy, RandomPolicy};
pub use rollout::{EpisodeRecord, EvaluationReport, RolloutConfig, RolloutRunner};
