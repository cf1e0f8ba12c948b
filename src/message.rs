// message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category tag used by recipients to filter their inbox.
///
/// The pipeline kinds are closed variants; anything else round-trips through
/// `Other` so an unknown tag is still representable. Routing is by recipient
/// name, never by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// Research notes produced by the researcher.
    Research,

    /// Article draft produced by the writer.
    Draft,

    /// Finished article produced by the editor.
    Final,

    /// Untyped payload. The default when no kind is given.
    Data,

    /// Any tag outside the pipeline vocabulary.
    Other(String),
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Research => "research",
            MessageKind::Draft => "draft",
            MessageKind::Final => "final",
            MessageKind::Data => "data",
            MessageKind::Other(tag) => tag,
        }
    }
}

impl Default for MessageKind {
    fn default() -> Self {
        MessageKind::Data
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for MessageKind {
    fn from(tag: &str) -> Self {
        match tag {
            "research" => MessageKind::Research,
            "draft" => MessageKind::Draft,
            "final" => MessageKind::Final,
            "data" => MessageKind::Data,
            other => MessageKind::Other(other.to_string()),
        }
    }
}

/// A message between agents. Constructed once by the mailbox on deposit,
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: Uuid,
    pub sender: String,
    pub recipient: String,
    pub content: String,
    pub kind: MessageKind,
    pub created_at: DateTime<Utc>,
}

/// Audit snapshot of a message, retained forever in the mailbox log.
///
/// The content is dropped at append time: the log exists for tracing who
/// talked to whom, not for replay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub sender: String,
    pub recipient: String,
    pub kind: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&Message> for LogRecord {
    fn from(message: &Message) -> Self {
        Self {
            sender: message.sender.clone(),
            recipient: message.recipient.clone(),
            kind: message.kind.to_string(),
            timestamp: message.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_roundtrip() {
        assert_eq!(MessageKind::from("research"), MessageKind::Research);
        assert_eq!(MessageKind::from("draft"), MessageKind::Draft);
        assert_eq!(MessageKind::from("final"), MessageKind::Final);
        assert_eq!(MessageKind::from("data"), MessageKind::Data);
        assert_eq!(
            MessageKind::from("gossip"),
            MessageKind::Other("gossip".to_string())
        );
        assert_eq!(MessageKind::from("gossip").to_string(), "gossip");
    }

    #[test]
    fn test_default_kind_is_data() {
        assert_eq!(MessageKind::default(), MessageKind::Data);
    }

    #[test]
    fn test_log_record_drops_content() {
        let message = Message {
            id: Uuid::new_v4(),
            sender: "Researcher".to_string(),
            recipient: "Writer".to_string(),
            content: "a very long body".to_string(),
            kind: MessageKind::Research,
            created_at: Utc::now(),
        };

        let record = LogRecord::from(&message);
        assert_eq!(record.sender, "Researcher");
        assert_eq!(record.recipient, "Writer");
        assert_eq!(record.kind, "research");
        assert_eq!(record.timestamp, message.created_at);
    }
}
