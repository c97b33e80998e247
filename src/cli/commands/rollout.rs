//! Rollout command - Evaluate a baseline policy over many episodes

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::{
    cli::output,
    config::SessionConfig,
    eval::{DwellPolicy, GreedyPolicy, RandomPolicy, RolloutConfig, RolloutRunner},
    ports::Policy,
    session::SearchSession,
    types::Action,
};

/// Baseline policy selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Uniform random actions
    Random,
    /// Descend toward the better-looking child, end at an apparent peak
    Greedy,
    /// Examine each node before deciding greedily
    Dwell,
}

pub(crate) fn build_policy(kind: PolicyKind, config: &SessionConfig) -> Box<dyn Policy> {
    match kind {
        PolicyKind::Random => Box::new(RandomPolicy::new()),
        PolicyKind::Greedy => Box::new(GreedyPolicy::new()),
        PolicyKind::Dwell => Box::new(DwellPolicy::new(config.cognitive_slowness)),
    }
}

#[derive(Parser, Debug)]
#[command(about = "Roll out a baseline policy", allow_negative_numbers = true)]
pub struct RolloutArgs {
    /// Policy to evaluate
    #[arg(value_enum)]
    pub policy: PolicyKind,

    /// Number of evaluation episodes
    #[arg(long, short = 'e', default_value_t = 100)]
    pub episodes: usize,

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

    /// Optional path for writing the report as JSON
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

pub fn execute(args: RolloutArgs) -> Result<()> {
    let mut session_config = SessionConfig::new()
        .with_depth(args.depth)
        .with_patience_penalty(args.patience_penalty)
        .with_cognitive_slowness(args.cognitive_slowness);
    if let Some(seed) = args.seed {
        session_config = session_config.with_seed(seed);
    }

    let mut policy = build_policy(args.policy, &session_config);
    let mut session = SearchSession::new(session_config)?;
    let runner = RolloutRunner::new(RolloutConfig {
        episodes: args.episodes,
        seed: args.seed,
    });

    let report = if args.progress {
        let pb = output::create_rollout_progress(args.episodes as u64);
        let report = runner.run_observed(&mut session, policy.as_mut(), |_, record| {
            pb.set_message(format!("last return {:.1}", record.total_reward));
            pb.inc(1);
        })?;
        pb.finish_and_clear();
        report
    } else {
        runner.run(&mut session, policy.as_mut())?
    };

    output::print_section(&format!("Rollout report: {}", report.policy));
    output::print_stats_table(&[
        ("Episodes", report.episodes.to_string()),
        ("Mean episode length", format!("{:.2}", report.mean_episode_length)),
        ("Mean return", format!("{:.2}", report.mean_return)),
        ("Mean final node value", format!("{:.2}", report.mean_final_value)),
    ]);

    println!("\n  Action distribution:");
    for (action, share) in Action::ALL.iter().zip(report.action_distribution) {
        output::print_kv(action.name(), &format!("{:.1}%", share * 100.0));
    }

    if let Some(path) = &args.summary {
        report.save(path)?;
        println!("\nReport written to: {}", path.display());
    }

    Ok(())
}
