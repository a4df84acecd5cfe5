//! Mock location source for testing

use async_trait::async_trait;
use fencewatch_core::Classification;
use fencewatch_util::SubjectId;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::{LocationSource, SourceError};

/// Mock location source for unit/integration testing.
///
/// Outcomes are scripted per subject and consumed in order; a subject with
/// no remaining script classifies as `Safe`. Every poll is recorded.
pub struct MockLocationSource {
    scripts: Mutex<HashMap<SubjectId, VecDeque<Classification>>>,
    polls: Mutex<Vec<SubjectId>>,
}

impl MockLocationSource {
    pub fn new() -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            polls: Mutex::new(Vec::new()),
        }
    }

    /// Queue classifications for a subject, consumed one per poll
    pub fn script(&self, subject: &SubjectId, outcomes: impl IntoIterator<Item = Classification>) {
        self.scripts
            .lock()
            .unwrap()
            .entry(subject.clone())
            .or_default()
            .extend(outcomes);
    }

    /// All polls observed so far, in order
    pub fn polls(&self) -> Vec<SubjectId> {
        self.polls.lock().unwrap().clone()
    }

    /// Number of polls observed for one subject
    pub fn poll_count(&self, subject: &SubjectId) -> usize {
        self.polls
            .lock()
            .unwrap()
            .iter()
            .filter(|polled| *polled == subject)
            .count()
    }
}

impl Default for MockLocationSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationSource for MockLocationSource {
    async fn fetch_status(&self, subject: &SubjectId) -> Result<Classification, SourceError> {
        self.polls.lock().unwrap().push(subject.clone());

        let outcome = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(subject)
            .and_then(|queue| queue.pop_front())
            .unwrap_or(Classification::Safe);

        Ok(outcome)
    }
}
