//! Prefix work queue
//!
//! Only the crawl engine's round loop touches the queue. Fetch tasks report
//! their outcome back to the loop, which then concludes the attempt here.

use crate::prefix::Prefix;
use std::collections::VecDeque;

/// Ordered queue of prefixes still waiting to be queried
#[derive(Debug, Clone, Default)]
pub struct PrefixQueue {
    items: VecDeque<Prefix>,
}

impl PrefixQueue {
    pub fn new(prefixes: Vec<Prefix>) -> Self {
        Self {
            items: prefixes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Copies up to `size` prefixes from the front without removing them
    pub fn front_batch(&self, size: usize) -> Vec<Prefix> {
        self.items.iter().take(size).cloned().collect()
    }

    /// Concludes one attempt for `prefix`
    ///
    /// The earliest occurrence is removed. When `retry` is set a fresh entry
    /// is appended at the back, where the current round's snapshot cannot
    /// see it.
    ///
    /// # Returns
    ///
    /// `true` if an occurrence was found and removed
    pub fn conclude(&mut self, prefix: &Prefix, retry: bool) -> bool {
        let removed = match self.items.iter().position(|p| p == prefix) {
            Some(index) => self.items.remove(index).is_some(),
            None => false,
        };

        if retry {
            self.items.push_back(prefix.clone());
        }

        removed
    }

    pub fn contains(&self, prefix: &Prefix) -> bool {
        self.items.contains(prefix)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Prefix> {
        self.items.iter()
    }

    /// Copies the queue in order, for checkpointing
    pub fn to_vec(&self) -> Vec<Prefix> {
        self.items.iter().cloned().collect()
    }
}
