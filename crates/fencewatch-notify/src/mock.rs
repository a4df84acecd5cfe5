//! Mock mail transport for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::{AlertMessage, MailError, MailTransport};

/// Mock mail transport for unit/integration testing
#[derive(Clone)]
pub struct MockMailer {
    sent: Arc<Mutex<Vec<AlertMessage>>>,

    /// Configure the next send to fail as sender-refused
    pub refuse_next_send: Arc<Mutex<bool>>,

    /// Configure the next send to fail with a transport error
    pub fail_next_send: Arc<Mutex<bool>>,

    /// Configure reconnects to fail
    pub fail_reconnect: Arc<Mutex<bool>>,

    reconnects: Arc<AtomicU32>,
    closed: Arc<AtomicBool>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            refuse_next_send: Arc::new(Mutex::new(false)),
            fail_next_send: Arc::new(Mutex::new(false)),
            fail_reconnect: Arc::new(Mutex::new(false)),
            reconnects: Arc::new(AtomicU32::new(0)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Messages delivered so far, in order
    pub fn sent(&self) -> Vec<AlertMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_subject_lines(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|m| m.subject_line.clone())
            .collect()
    }

    pub fn reconnect_count(&self) -> u32 {
        self.reconnects.load(Ordering::SeqCst)
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailTransport for MockMailer {
    async fn send(&mut self, message: &AlertMessage) -> Result<(), MailError> {
        {
            let mut refuse = self.refuse_next_send.lock().unwrap();
            if *refuse {
                *refuse = false;
                return Err(MailError::SenderRefused);
            }
        }
        {
            let mut fail = self.fail_next_send.lock().unwrap();
            if *fail {
                *fail = false;
                return Err(MailError::Transport("simulated transport failure".into()));
            }
        }

        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }

    async fn reconnect(&mut self) -> Result<(), MailError> {
        if *self.fail_reconnect.lock().unwrap() {
            return Err(MailError::Transport("simulated reconnect failure".into()));
        }
        self.reconnects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn close(&mut self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
