//! Fixed alert templates, one per alert kind

use fencewatch_core::AlertKind;
use fencewatch_util::SubjectId;

/// A rendered alert: subject line plus plain-text body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject_line: String,
    pub body: String,
}

/// Render the fixed template for `kind` and `subject`.
pub fn render(kind: AlertKind, subject: &SubjectId) -> AlertMessage {
    match kind {
        AlertKind::ApiError => AlertMessage {
            subject_line: format!("[ALERT] API error for subject {subject}"),
            body: format!(
                "There was an API error while attempting to fetch location data for subject {subject}."
            ),
        },
        AlertKind::Lost => AlertMessage {
            subject_line: format!("[ALERT] Subject {subject} out of bounds"),
            body: format!(
                "Subject {subject} has left their approved boundary. Contact them as soon as possible to confirm their safety."
            ),
        },
        AlertKind::Critical => AlertMessage {
            subject_line: format!("[ALERT] Subject {subject} out of bounds for an extended period"),
            body: format!(
                "Subject {subject} has stayed outside their approved boundary since the previous check. Consider initiating the appropriate safety escalation."
            ),
        },
        AlertKind::Safe => AlertMessage {
            subject_line: format!("[ALERT] Subject {subject} returned to bounds"),
            body: format!(
                "Subject {subject} has returned to within their approved boundary."
            ),
        },
    }
}
