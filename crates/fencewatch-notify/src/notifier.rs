//! The notifier: renders alerts and owns the mail session

use fencewatch_core::AlertKind;
use fencewatch_util::SubjectId;
use tracing::{debug, warn};

use crate::{MailError, MailTransport, render};

/// Renders and dispatches alerts over an exclusively-owned mail session.
pub struct Notifier<M: MailTransport> {
    transport: M,
}

impl<M: MailTransport> Notifier<M> {
    pub fn new(transport: M) -> Self {
        Self { transport }
    }

    /// Render and send the alert for `kind`.
    ///
    /// A sender-refused send means the session is gone: a fresh session is
    /// established once and this alert is dropped for the tick. Every other
    /// send failure propagates.
    pub async fn notify(&mut self, kind: AlertKind, subject: &SubjectId) -> Result<(), MailError> {
        let message = render(kind, subject);

        match self.transport.send(&message).await {
            Ok(()) => {
                debug!(subject = %subject, kind = %kind, "Alert dispatched");
                Ok(())
            }
            Err(MailError::SenderRefused) => {
                warn!(
                    subject = %subject,
                    kind = %kind,
                    "Mail session refused the sender; reopening session, alert dropped"
                );
                self.transport.reconnect().await
            }
            Err(e) => Err(e),
        }
    }

    /// Close the session at end of run.
    pub async fn close(&mut self) {
        self.transport.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockMailer;

    #[tokio::test]
    async fn delivered_alert_is_recorded() {
        let mailer = MockMailer::new();
        let mut notifier = Notifier::new(mailer.clone());

        notifier
            .notify(AlertKind::Lost, &SubjectId::new("1"))
            .await
            .unwrap();

        let lines = mailer.sent_subject_lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("out of bounds"));
        assert_eq!(mailer.reconnect_count(), 0);
    }

    #[tokio::test]
    async fn sender_refused_reconnects_once_and_drops_the_alert() {
        let mailer = MockMailer::new();
        *mailer.refuse_next_send.lock().unwrap() = true;
        let mut notifier = Notifier::new(mailer.clone());

        notifier
            .notify(AlertKind::Lost, &SubjectId::new("1"))
            .await
            .unwrap();

        assert!(mailer.sent().is_empty(), "refused alert must not be retried");
        assert_eq!(mailer.reconnect_count(), 1);

        // The fresh session delivers subsequent alerts
        notifier
            .notify(AlertKind::Critical, &SubjectId::new("1"))
            .await
            .unwrap();
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(mailer.reconnect_count(), 1);
    }

    #[tokio::test]
    async fn reconnect_failure_propagates() {
        let mailer = MockMailer::new();
        *mailer.refuse_next_send.lock().unwrap() = true;
        *mailer.fail_reconnect.lock().unwrap() = true;
        let mut notifier = Notifier::new(mailer.clone());

        let result = notifier.notify(AlertKind::Safe, &SubjectId::new("2")).await;
        assert!(matches!(result, Err(MailError::Transport(_))));
    }

    #[tokio::test]
    async fn other_send_failures_propagate_without_reconnect() {
        let mailer = MockMailer::new();
        *mailer.fail_next_send.lock().unwrap() = true;
        let mut notifier = Notifier::new(mailer.clone());

        let result = notifier.notify(AlertKind::Safe, &SubjectId::new("2")).await;

        assert!(matches!(result, Err(MailError::Transport(_))));
        assert_eq!(mailer.reconnect_count(), 0);
    }

    #[tokio::test]
    async fn close_closes_the_session() {
        let mailer = MockMailer::new();
        let mut notifier = Notifier::new(mailer.clone());

        notifier.close().await;
        assert!(mailer.was_closed());
    }
}
