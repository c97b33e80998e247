//! Trace command - Step through one episode printing each observation

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::commands::rollout::{PolicyKind, build_policy},
    config::SessionConfig,
    session::SearchSession,
};

#[derive(Parser, Debug)]
#[command(about = "Trace a single episode step by step", allow_negative_numbers = true)]
pub struct TraceArgs {
    /// Policy driving the episode
    #[arg(value_enum, default_value_t = PolicyKind::Greedy)]
    pub policy: PolicyKind,

    /// Levels of the search tree below the root
    #[arg(long, short = 'd', default_value_t = 4)]
    pub depth: usize,

    /// Per-step penalty
    #[arg(long, default_value_t = 1.0)]
    pub patience_penalty: f64,

    /// Examination steps needed for an exact reading
    #[arg(long, default_value_t = 3)]
    pub cognitive_slowness: u32,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: TraceArgs) -> Result<()> {
    let mut session_config = SessionConfig::new()
        .with_depth(args.depth)
        .with_patience_penalty(args.patience_penalty)
        .with_cognitive_slowness(args.cognitive_slowness);
    if let Some(seed) = args.seed {
        session_config = session_config.with_seed(seed);
    }

    let mut policy = build_policy(args.policy, &session_config);
    let mut session = SearchSession::new(session_config)?;

    policy.begin_episode();
    if let Some(seed) = args.seed {
        policy.set_rng_seed(seed);
    }

    let mut observation = session.observation();
    let mut total_reward = 0.0;

    println!(
        "step {:4}  {:8}  obs {}  true value {:.2}",
        0,
        "reset",
        observation,
        session.current_true_value()
    );

    loop {
        let action = policy.select_action(&observation);
        let result = session.step(action)?;
        total_reward += result.reward;
        observation = result.observation;

        println!(
            "step {:4}  {:8}  obs {}  reward {:+.2}  true value {:.2}",
            session.step_count(),
            action.name(),
            observation,
            result.reward,
            session.current_true_value()
        );

        if result.terminated {
            break;
        }
    }

    println!(
        "\nEpisode over after {} steps: return {:.2}, final node value {:.2}",
        session.step_count(),
        total_reward,
        session.current_true_value()
    );

    Ok(())
}
