use chrono::Utc;

/// Who produced a log entry. Error entries render distinctly but are
/// otherwise ordinary log entries, never fatal to the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Error,
}

/// A log entry that has not been appended yet; the log assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

impl LogEntry {
    pub fn new(role: Role, content: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Entry stamped with the local clock (RFC 3339), for locally
    /// originated messages.
    pub fn now(role: Role, content: impl Into<String>) -> Self {
        Self::new(role, content, Utc::now().to_rfc3339())
    }
}

/// An appended, immutable conversation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: String,
}

/// Append-only conversation log.
///
/// Ids are monotonic and never reused, including across `new_chat`; an
/// appended message is never mutated.
#[derive(Debug)]
pub struct ChatLog {
    messages: Vec<Message>,
    next_id: u64,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            next_id: 1,
        }
    }

    /// A log seeded with the assistant greeting, as shown when the chat
    /// view opens.
    pub fn with_greeting() -> Self {
        let mut log = Self::new();
        log.append(greeting());
        log
    }

    pub fn append(&mut self, entry: LogEntry) -> &Message {
        let message = Message {
            id: self.next_id,
            role: entry.role,
            content: entry.content,
            timestamp: entry.timestamp,
        };
        self.next_id += 1;
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    /// Replace the conversation with a single fresh greeting. Session
    /// identity is untouched; that belongs to the caller.
    pub fn new_chat(&mut self) -> &Message {
        self.messages.clear();
        self.append(greeting())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn greeting() -> LogEntry {
    LogEntry::now(Role::Assistant, t!("chat.greeting").into_owned())
}
