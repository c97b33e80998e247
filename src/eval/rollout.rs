//! Episode rollout runner and aggregate evaluation report.

use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    ports::Policy,
    session::SearchSession,
    types::Action,
};

/// Rollout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RolloutConfig {
    /// Number of evaluation episodes
    pub episodes: usize,

    /// Random seed
    ///
    /// Seeds the policy once and derives a distinct seed per episode, so
    /// the whole evaluation is reproducible.
    pub seed: Option<u64>,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            seed: None,
        }
    }
}

/// Statistics of a single completed episode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Steps until termination
    pub length: usize,

    /// Sum of rewards over the episode
    pub total_reward: f64,

    /// Ground-truth value of the node the agent ended on
    pub final_value: f64,

    /// How often each action was taken, in contract order
    pub action_counts: [usize; Action::COUNT],
}

/// Aggregate result of an evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Name of the evaluated policy
    pub policy: String,

    /// Episodes evaluated
    pub episodes: usize,

    /// Mean steps per episode
    pub mean_episode_length: f64,

    /// Mean episodic return
    pub mean_return: f64,

    /// Mean ground-truth value of the final node
    pub mean_final_value: f64,

    /// Share of each action across all steps, in contract order
    pub action_distribution: [f64; Action::COUNT],
}

impl EvaluationReport {
    /// Aggregate episode records into a report.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoEpisodes`] for an empty record set.
    pub fn from_records(policy: impl Into<String>, records: &[EpisodeRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(crate::Error::NoEpisodes);
        }

        let lengths: Vec<f64> = records.iter().map(|r| r.length as f64).collect();
        let returns: Vec<f64> = records.iter().map(|r| r.total_reward).collect();
        let final_values: Vec<f64> = records.iter().map(|r| r.final_value).collect();

        let mut counts = [0usize; Action::COUNT];
        for record in records {
            for (total, count) in counts.iter_mut().zip(record.action_counts) {
                *total += count;
            }
        }
        let normalized = crate::utils::normalize_counts(&counts);
        let mut action_distribution = [0.0; Action::COUNT];
        action_distribution.copy_from_slice(&normalized);

        Ok(Self {
            policy: policy.into(),
            episodes: records.len(),
            mean_episode_length: crate::utils::mean(&lengths),
            mean_return: crate::utils::mean(&returns),
            mean_final_value: crate::utils::mean(&final_values),
            action_distribution,
        })
    }

    /// Save report to JSON file
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load report from JSON file
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let report = serde_json::from_reader(file)?;
        Ok(report)
    }
}

/// Runs a policy against a session for a configured number of episodes.
pub struct RolloutRunner {
    config: RolloutConfig,
}

impl RolloutRunner {
    /// Create a new rollout runner
    pub fn new(config: RolloutConfig) -> Self {
        Self { config }
    }

    /// Roll out one episode and collect its statistics.
    ///
    /// # Errors
    ///
    /// Propagates any contract violation from the session; a well-behaved
    /// policy/session pair never triggers one.
    pub fn run_episode(
        &self,
        session: &mut SearchSession,
        policy: &mut dyn Policy,
        seed: Option<u64>,
    ) -> Result<EpisodeRecord> {
        policy.begin_episode();
        let mut observation = session.reset(seed);

        let mut length = 0;
        let mut total_reward = 0.0;
        let mut action_counts = [0usize; Action::COUNT];

        loop {
            let action = policy.select_action(&observation);
            let result = session.step(action)?;

            length += 1;
            total_reward += result.reward;
            action_counts[action.index()] += 1;
            observation = result.observation;

            if result.terminated {
                // The terminal step never moves, so the session still
                // points at the node the agent ended on.
                return Ok(EpisodeRecord {
                    length,
                    total_reward,
                    final_value: session.current_true_value(),
                    action_counts,
                });
            }
        }
    }

    /// Roll out all configured episodes and aggregate a report.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoEpisodes`] when configured with zero
    /// episodes, or any contract violation surfaced by an episode.
    pub fn run(&self, session: &mut SearchSession, policy: &mut dyn Policy) -> Result<EvaluationReport> {
        self.run_observed(session, policy, |_, _| {})
    }

    /// Like [`run`], invoking a callback after every episode.
    ///
    /// The callback receives the zero-based episode index and its record;
    /// the CLI uses it to drive a progress bar.
    ///
    /// # Errors
    ///
    /// Same conditions as [`run`].
    ///
    /// [`run`]: RolloutRunner::run
    pub fn run_observed(
        &self,
        session: &mut SearchSession,
        policy: &mut dyn Policy,
        mut on_episode: impl FnMut(usize, &EpisodeRecord),
    ) -> Result<EvaluationReport> {
        if let Some(seed) = self.config.seed {
            policy.set_rng_seed(seed);
        }

        let mut records = Vec::with_capacity(self.config.episodes);
        for episode in 0..self.config.episodes {
            let episode_seed = self
                .config
                .seed
                .map(|seed| seed.wrapping_add(episode as u64));
            let record = self.run_episode(session, policy, episode_seed)?;
            on_episode(episode, &record);
            records.push(record);
        }

        EvaluationReport::from_records(policy.name(), &records)
    }
}
