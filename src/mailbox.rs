// mailbox.rs

use crate::logging;
use crate::message::{LogRecord, Message, MessageKind};
use chrono::Utc;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Debug, Default)]
struct MailboxInner {
    /// Pending messages, insertion order = send order.
    pending: Vec<Message>,

    /// Append-only audit log, a superset of every message ever deposited.
    log: Vec<LogRecord>,
}

/// Shared coordination primitive for inter-agent messaging.
///
/// One mailbox exists per pipeline run and is shared by reference across all
/// agents. Deposits store messages until the addressed recipient withdraws
/// them; every deposit also lands in the audit log, which never shrinks.
/// Deposit and withdraw each take the lock once, so they stay atomic even if
/// agents are ever driven concurrently.
#[derive(Debug)]
pub struct Mailbox {
    inner: Mutex<MailboxInner>,
}

impl Mailbox {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(MailboxInner::default()),
        })
    }

    /// Constructs a message with the current timestamp and queues it for the
    /// recipient. The log entry is appended before the pending entry, so the
    /// log is always a superset of the pending buffer.
    ///
    /// # Arguments
    /// * `sender` - Name of the sending agent.
    /// * `recipient` - Name of the addressed agent.
    /// * `content` - Payload to transmit.
    /// * `kind` - Category tag for recipient-side filtering.
    ///
    /// # Returns
    /// * The constructed `Message`.
    pub fn deposit(
        &self,
        sender: &str,
        recipient: &str,
        content: String,
        kind: MessageKind,
    ) -> Message {
        let message = Message {
            id: Uuid::new_v4(),
            sender: sender.to_string(),
            recipient: recipient.to_string(),
            content,
            kind,
            created_at: Utc::now(),
        };

        let mut inner = self.inner.lock().unwrap();
        inner.log.push(LogRecord::from(&message));
        inner.pending.push(message.clone());
        logging::debug(&format!(
            "{} -> {} [{}]",
            message.sender, message.recipient, message.kind
        ));
        message
    }

    /// Removes and returns every pending message addressed to `recipient`,
    /// in original send order. Messages for other recipients are untouched.
    ///
    /// Consume-and-delete: a second call with no intervening deposit returns
    /// an empty sequence, so each message is delivered at most once.
    pub fn withdraw(&self, recipient: &str) -> Vec<Message> {
        let mut inner = self.inner.lock().unwrap();
        let (withdrawn, remaining): (Vec<Message>, Vec<Message>) = inner
            .pending
            .drain(..)
            .partition(|message| message.recipient == recipient);
        inner.pending = remaining;
        withdrawn
    }

    /// Number of messages currently waiting for any recipient.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().unwrap().pending.len()
    }

    /// Copy of the full audit log.
    pub fn log_snapshot(&self) -> Vec<LogRecord> {
        self.inner.lock().unwrap().log.clone()
    }

    /// Serializes the full audit log to `path` as pretty-printed JSON.
    ///
    /// # Returns
    /// * `Ok(())` if the file is successfully written.
    /// * `Err(io::Error)` if serialization or the write fails.
    pub fn export_log(&self, path: &Path) -> io::Result<()> {
        let records = self.log_snapshot();
        let json = serde_json::to_string_pretty(&records)?;
        fs::write(path, json)
    }
}
