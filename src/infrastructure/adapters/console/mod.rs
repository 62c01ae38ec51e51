//! Console adapter for development/testing

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use crate::domain::entities::Message;
use crate::domain::traits::{Bot, BotInfo, KeyboardButton};
use crate::application::errors::BotError;
use crate::application::messaging::MessageParser;

/// Chat id used for every console message
pub const CONSOLE_CHAT_ID: &str = "console";

/// Lines starting with this marker are treated as inline-button presses
pub const BUTTON_MARKER: char = '!';

/// Console bot adapter for local development
pub struct ConsoleAdapter {
    info: BotInfo,
    lines: Mutex<Lines<BufReader<Stdin>>>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "insurance-bot".to_string(),
                username: "console".to_string(),
            },
            lines: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
        }
    }

    /// Next stdin line, `None` on EOF
    pub async fn read_line(&self, prompt: &str) -> Result<Option<String>, BotError> {
        println!("{}", prompt);
        let mut lines = self.lines.lock().await;
        lines
            .next_line()
            .await
            .map(|line| line.map(|l| l.trim().to_string()))
            .map_err(|e| BotError::Internal(format!("stdin: {}", e)))
    }

    /// Map a console line to a message: `!data` presses a button, anything else is chat text
    pub fn to_message(line: &str, parser: &MessageParser, press_id: u64) -> Message {
        let message = match line.strip_prefix(BUTTON_MARKER) {
            Some(data) => parser.parse_callback(CONSOLE_CHAT_ID, press_id.to_string(), data.trim(), None),
            None => parser.parse(CONSOLE_CHAT_ID, line, None),
        };
        message.with_platform("console")
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        println!("Type /help for commands, {}<callback data> to press a button.", BUTTON_MARKER);
        Ok(())
    }

    async fn send_message(&self, _chat_id: &str, text: &str) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        Ok("console_msg".to_string())
    }

    async fn send_with_keyboard(&self, _chat_id: &str, text: &str, buttons: Vec<Vec<KeyboardButton>>) -> Result<String, BotError> {
        println!("[BOT] {}", text);
        for row in buttons {
            let row_text: Vec<String> = row
                .iter()
                .map(|b| match &b.callback_data {
                    Some(data) => format!("{} ({}{})", b.text, BUTTON_MARKER, data),
                    None => b.text.clone(),
                })
                .collect();
            println!("  [Buttons] {}", row_text.join(" | "));
        }
        Ok("console_msg".to_string())
    }

    async fn answer_callback(&self, _callback_id: &str, _text: Option<&str>) -> Result<(), BotError> {
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}
