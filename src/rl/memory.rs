//! Experience replay memory for Q-learning
//!
//! A bounded FIFO of transitions. Once full, every push evicts the oldest
//! entry, so the memory always holds the most recent `capacity` steps.

use super::observation::Observation;
use crate::game::RelativeAction;
use rand::Rng;
use std::collections::VecDeque;

/// One step of experience
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Observation before the action
    pub state: Observation,
    /// Action taken
    pub action: RelativeAction,
    /// Reward received
    pub reward: f32,
    /// Observation after the action
    pub next_state: Observation,
    /// Whether the action ended the episode
    pub terminated: bool,
}

/// Capacity-bounded replay memory
///
/// # Example
///
/// ```rust
/// use snake_dqn::game::RelativeAction;
/// use snake_dqn::rl::{Observation, ReplayMemory, Transition};
///
/// let mut memory = ReplayMemory::new(2);
/// let t = Transition {
///     state: Observation::default(),
///     action: RelativeAction::Straight,
///     reward: 0.0,
///     next_state: Observation::default(),
///     terminated: false,
/// };
///
/// memory.push(t);
/// memory.push(t);
/// memory.push(t);
/// assert_eq!(memory.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ReplayMemory {
    transitions: VecDeque<Transition>,
    capacity: usize,
}

impl ReplayMemory {
    pub fn new(capacity: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Append a transition, dropping the oldest one when full
    pub fn push(&mut self, transition: Transition) {
        if self.capacity == 0 {
            return;
        }

        if self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Draw up to `batch_size` transitions
    ///
    /// When the memory holds no more than `batch_size` entries, all of them
    /// are returned in insertion order. Otherwise exactly `batch_size`
    /// distinct entries are picked uniformly, in no particular order.
    pub fn sample<R: Rng + ?Sized>(&self, batch_size: usize, rng: &mut R) -> Vec<Transition> {
        let len = self.transitions.len();

        if len <= batch_size {
            return self.transitions.iter().copied().collect();
        }

        rand::seq::index::sample(rng, len, batch_size)
            .into_iter()
            .map(|i| self.transitions[i])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.transitions.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterate oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }
}
