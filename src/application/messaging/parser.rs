//! Message parser - Parses raw chat input into structured messages

use crate::domain::entities::{Content, Message};

/// Parses incoming text and button presses into Message objects
pub struct MessageParser {
    command_prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            command_prefix: prefix.into(),
        }
    }

    /// Parse a text message
    pub fn parse(&self, chat_id: impl Into<String>, text: impl Into<String>, sender: Option<String>) -> Message {
        let text = text.into();
        let chat_id = chat_id.into();

        if text.trim().is_empty() {
            return Message::new(chat_id, Content::Empty).with_sender_opt(sender);
        }

        if let Some(cmd_text) = self.strip_prefix(text.trim_start()) {
            return Message::new(chat_id, Self::parse_command(cmd_text)).with_sender_opt(sender);
        }

        // Regular text message
        Message::new(chat_id, Content::Text(text)).with_sender_opt(sender)
    }

    fn strip_prefix<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.strip_prefix('/')
            .or_else(|| {
                if self.command_prefix.is_empty() {
                    None
                } else {
                    text.strip_prefix(self.command_prefix.as_str())
                }
            })
    }

    /// Split `name[@bot] args...` into the command word and its raw argument string
    fn parse_command(cmd_text: &str) -> Content {
        let (head, args) = cmd_text
            .split_once(char::is_whitespace)
            .unwrap_or((cmd_text, ""));

        // Group chats address commands as /name@bot_username
        let name = head.split('@').next().unwrap_or(head);

        Content::Command {
            name: name.to_string(),
            args: args.trim().to_string(),
        }
    }

    /// Parse a callback query (inline button press)
    pub fn parse_callback(
        &self,
        chat_id: impl Into<String>,
        query_id: impl Into<String>,
        data: impl Into<String>,
        sender: Option<String>,
    ) -> Message {
        Message::from_callback(chat_id, query_id, data).with_sender_opt(sender)
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        Self::new("/")
    }
}
