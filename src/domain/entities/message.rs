use chrono::{DateTime, Utc};

/// Type of message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Command,
    Callback,
    Other(String),
}

impl MessageType {
    pub fn as_str(&self) -> &str {
        match self {
            MessageType::Text => "text",
            MessageType::Command => "command",
            MessageType::Callback => "callback",
            MessageType::Other(s) => s,
        }
    }
}

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    /// `name` is the raw command word without the prefix, `args` the rest of the line
    Command { name: String, args: String },
    /// Inline-button press
    CallbackData { query_id: String, data: String },
    Empty,
}

impl Content {
    pub fn is_command(&self) -> bool {
        matches!(self, Content::Command { .. })
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, Content::CallbackData { .. })
    }
}

/// Represents an incoming message or button press
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: String,
    pub sender: Option<String>,
    pub content: Content,
    pub message_type: MessageType,
    pub timestamp: DateTime<Utc>,
    pub platform: String,
}

impl Message {
    pub fn new(chat_id: impl Into<String>, content: Content) -> Self {
        let message_type = match &content {
            Content::Command { .. } => MessageType::Command,
            Content::CallbackData { .. } => MessageType::Callback,
            Content::Text(_) => MessageType::Text,
            Content::Empty => MessageType::Other("empty".to_string()),
        };
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id: chat_id.into(),
            sender: None,
            content,
            message_type,
            timestamp: Utc::now(),
            platform: "unknown".to_string(),
        }
    }

    pub fn from_text(chat_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(chat_id, Content::Text(text.into()))
    }

    pub fn from_callback(
        chat_id: impl Into<String>,
        query_id: impl Into<String>,
        data: impl Into<String>,
    ) -> Self {
        Self::new(
            chat_id,
            Content::CallbackData {
                query_id: query_id.into(),
                data: data.into(),
            },
        )
    }

    pub fn with_sender_opt(mut self, sender: Option<String>) -> Self {
        if sender.is_some() {
            self.sender = sender;
        }
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_stamped() {
        let first = Message::from_text("1", "hi");
        let second = Message::from_text("1", "hi");

        assert_ne!(first.id, second.id);
        assert!(uuid::Uuid::parse_str(&first.id).is_ok());
        assert!(first.timestamp <= Utc::now());
        assert_eq!(first.platform, "unknown");
    }

    #[test]
    fn test_message_type_follows_content() {
        assert_eq!(Message::from_callback("1", "q", "d").message_type, MessageType::Callback);
        assert_eq!(Message::new("1", Content::Empty).message_type.as_str(), "empty");
    }
}
