//! Training statistics tracking
//!
//! Keeps the full score history needed for plotting (every score and the
//! running mean after each episode) alongside rolling windows that smooth
//! the log output.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::Path;

/// Score history exported for plotting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreHistory {
    /// Final score of every episode, in order
    pub scores: Vec<u32>,
    /// Mean of all scores after each episode
    pub mean_scores: Vec<f32>,
    /// Highest score seen
    pub record: u32,
}

/// Training statistics tracker
///
/// # Example
///
/// ```rust
/// use snake_dqn::metrics::TrainingStats;
///
/// let mut stats = TrainingStats::new(100);
///
/// assert!(stats.record_episode(3, 120));
/// assert!(!stats.record_episode(1, 40));
///
/// assert_eq!(stats.record(), 3);
/// assert_eq!(stats.mean_score(), 2.0);
/// println!("{}", stats.format_summary());
/// ```
#[derive(Debug, Clone)]
pub struct TrainingStats {
    scores: Vec<u32>,
    mean_scores: Vec<f32>,
    total_score: u64,
    record: u32,

    /// Total number of environment steps taken
    total_steps: usize,

    /// Recent scores (rolling window)
    recent_scores: VecDeque<u32>,

    /// Recent batch losses (rolling window)
    losses: VecDeque<f32>,

    window_size: usize,
}

impl TrainingStats {
    /// Create a tracker whose rolling windows hold `window_size` values
    pub fn new(window_size: usize) -> Self {
        Self {
            scores: Vec::new(),
            mean_scores: Vec::new(),
            total_score: 0,
            record: 0,
            total_steps: 0,
            recent_scores: VecDeque::with_capacity(window_size),
            losses: VecDeque::with_capacity(window_size),
            window_size,
        }
    }

    /// Carry the record over from a resumed checkpoint
    pub fn with_record(mut self, record: u32) -> Self {
        self.record = record;
        self
    }

    /// Record a finished episode
    ///
    /// Returns true if `score` beats the previous record. Ties do not count.
    pub fn record_episode(&mut self, score: u32, steps: usize) -> bool {
        self.scores.push(score);
        self.total_score += u64::from(score);
        self.mean_scores.push(self.mean_score());
        self.total_steps += steps;
        Self::push_deque(&mut self.recent_scores, score, self.window_size);

        let new_record = score > self.record;
        if new_record {
            self.record = score;
        }
        new_record
    }

    /// Record the loss of an end-of-episode batch update
    pub fn record_loss(&mut self, loss: f32) {
        Self::push_deque(&mut self.losses, loss, self.window_size);
    }

    /// Mean of every score recorded so far
    pub fn mean_score(&self) -> f32 {
        if self.scores.is_empty() {
            0.0
        } else {
            self.total_score as f32 / self.scores.len() as f32
        }
    }

    /// Mean score over the rolling window
    pub fn recent_mean_score(&self) -> f32 {
        if self.recent_scores.is_empty() {
            0.0
        } else {
            self.recent_scores.iter().sum::<u32>() as f32 / self.recent_scores.len() as f32
        }
    }

    /// Mean batch loss over the rolling window
    pub fn mean_loss(&self) -> f32 {
        if self.losses.is_empty() {
            0.0
        } else {
            self.losses.iter().sum::<f32>() / self.losses.len() as f32
        }
    }

    pub fn record(&self) -> u32 {
        self.record
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn mean_scores(&self) -> &[f32] {
        &self.mean_scores
    }

    /// Episodes recorded by this tracker
    pub fn total_episodes(&self) -> usize {
        self.scores.len()
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn history(&self) -> ScoreHistory {
        ScoreHistory {
            scores: self.scores.clone(),
            mean_scores: self.mean_scores.clone(),
            record: self.record,
        }
    }

    /// Write the score history as JSON
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&self.history())
            .context("Failed to serialize score history")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write score history to {:?}", path))?;

        Ok(())
    }

    /// One-line summary for the training log
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Mean: {:.2} | Recent: {:.2} | Record: {} | Loss: {:.4}",
            self.total_episodes(),
            self.total_steps,
            self.mean_score(),
            self.recent_mean_score(),
            self.record,
            self.mean_loss(),
        )
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
