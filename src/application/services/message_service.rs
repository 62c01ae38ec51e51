use crate::domain::entities::{Content, Message};
use crate::application::errors::BotError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::traits::Bot;

/// Runs inbound messages through the dispatcher and delivers the outcome
pub struct MessageService<B: Bot> {
    bot: B,
    dispatcher: MessageDispatcher,
}

impl<B: Bot> MessageService<B> {
    pub fn new(bot: B, dispatcher: MessageDispatcher) -> Self {
        Self { bot, dispatcher }
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn dispatcher(&self) -> &MessageDispatcher {
        &self.dispatcher
    }

    /// Process an incoming message.
    ///
    /// Command failures are sent back as plain text. Callback queries are
    /// always acknowledged, but their failures are only logged.
    pub async fn process(&self, message: Message) -> Result<(), BotError> {
        tracing::debug!(
            "[{}] {} {} from {} via {} at {}",
            message.chat_id,
            message.message_type.as_str(),
            message.id,
            message.sender.as_deref().unwrap_or("unknown"),
            message.platform,
            message.timestamp.to_rfc3339()
        );

        let outcome = self.dispatcher.dispatch(&message);

        match &message.content {
            Content::Command { name, .. } => match outcome {
                Ok(Some(reply)) => {
                    self.bot.send_reply(&message.chat_id, &reply).await?;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("[{}] /{} failed: {}", message.chat_id, name, e);
                    self.bot.send_message(&message.chat_id, &e.to_string()).await?;
                }
            },
            Content::CallbackData { query_id, data } => {
                if let Err(e) = self.bot.answer_callback(query_id, None).await {
                    tracing::warn!("Failed to answer callback {}: {}", query_id, e);
                }
                match outcome {
                    Ok(Some(reply)) => {
                        self.bot.send_reply(&message.chat_id, &reply).await?;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("[{}] callback {:?} failed: {}", message.chat_id, data, e);
                    }
                }
            }
            Content::Text(_) | Content::Empty => {
                if let Ok(Some(reply)) = outcome {
                    self.bot.send_reply(&message.chat_id, &reply).await?;
                }
            }
        }

        Ok(())
    }
}
