//! The watch engine: one status per roster subject

use fencewatch_util::SubjectId;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::{AlertKind, Classification, Status, advance};

/// Errors from watch engine operations
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unknown subject: {0}")]
    UnknownSubject(SubjectId),
}

/// The result of applying one classification to one subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub subject: SubjectId,
    pub previous: Status,
    pub next: Status,
    /// Notification to dispatch, if this observation calls for one
    pub alert: Option<AlertKind>,
}

/// Holds the status map for the whole roster.
///
/// Created once at startup with every subject `Safe`, mutated only through
/// [`WatchEngine::observe`], and discarded at process exit. Roster order is
/// the caller's concern; the engine only guarantees one status per subject.
pub struct WatchEngine {
    statuses: HashMap<SubjectId, Status>,
}

impl WatchEngine {
    pub fn new(roster: impl IntoIterator<Item = SubjectId>) -> Self {
        let statuses: HashMap<_, _> = roster.into_iter().map(|id| (id, Status::Safe)).collect();

        info!(roster_size = statuses.len(), "Watch engine initialized");

        Self { statuses }
    }

    /// Current status of a subject, if tracked
    pub fn status(&self, subject: &SubjectId) -> Option<Status> {
        self.statuses.get(subject).copied()
    }

    pub fn roster_size(&self) -> usize {
        self.statuses.len()
    }

    /// Apply one poll classification to one subject.
    ///
    /// Advances the stored status per the transition table and returns the
    /// transition record, including the alert to dispatch (if any).
    pub fn observe(
        &mut self,
        subject: &SubjectId,
        classification: Classification,
    ) -> Result<Transition, EngineError> {
        let previous = *self
            .statuses
            .get(subject)
            .ok_or_else(|| EngineError::UnknownSubject(subject.clone()))?;

        let (next, alert) = advance(previous, classification);
        self.statuses.insert(subject.clone(), next);

        if previous != next {
            info!(
                subject = %subject,
                from = %previous,
                to = %next,
                "Subject status changed"
            );
        } else {
            debug!(
                subject = %subject,
                status = %next,
                classification = %classification,
                "Subject status unchanged"
            );
        }

        Ok(Transition {
            subject: subject.clone(),
            previous,
            next,
            alert,
        })
    }
}
