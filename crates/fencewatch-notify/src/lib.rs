//! Alert rendering and mail delivery for fencewatch
//!
//! The [`Notifier`] owns the one mail session for the whole run. A send
//! rejected by the session ("sender refused") invalidates it: the Notifier
//! re-establishes a fresh session exactly once and drops that alert for the
//! tick — delivery is best effort by contract. Every other send failure
//! propagates to the caller.

mod message;
mod mock;
mod notifier;
mod smtp;

pub use message::*;
pub use mock::*;
pub use notifier::*;
pub use smtp::*;

use async_trait::async_trait;
use thiserror::Error;

/// Errors from mail transport operations
#[derive(Debug, Error)]
pub enum MailError {
    /// The session rejected the sender; the session is considered dead
    #[error("Mail session rejected the sender")]
    SenderRefused,

    #[error("Mail transport failure: {0}")]
    Transport(String),

    #[error("Invalid mail message: {0}")]
    InvalidMessage(String),
}

/// One logical mail session with connect/send/close lifecycle
#[async_trait]
pub trait MailTransport: Send {
    /// Send one rendered alert over the current session
    async fn send(&mut self, message: &AlertMessage) -> Result<(), MailError>;

    /// Tear down the current session and establish a fresh authenticated one
    async fn reconnect(&mut self) -> Result<(), MailError>;

    /// Close the session at end of run
    async fn close(&mut self);
}
