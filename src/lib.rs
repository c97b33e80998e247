//! Noisy binary-tree search environment for reinforcement learning
//! experiments
//!
//! This crate provides:
//! - Procedural generation of perfect binary trees with Gaussian-walk
//!   node values
//! - A search session exposing the step/reset interaction contract, with
//!   noisy, time-decaying perception of the agent's surroundings
//! - Trait boundaries for environments and policies
//! - Scripted baseline policies and an episode rollout/evaluation runner
//! - A CLI for rollouts, episode traces, and tree inspection

pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod ports;
pub mod session;
pub mod tree;
pub mod types;
pub mod utils;

pub use config::SessionConfig;
pub use error::{Error, Result};
pub use eval::{EvaluationReport, RolloutConfig, RolloutRunner};
pub use ports::{Environment, Policy};
pub use session::SearchSession;
pub use tree::{SearchTree, TreeNode};
pub use types::{Action, NodeId, Observation, StepResult};
