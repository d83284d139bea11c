//! Reply delivery abstraction

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::ParseMode;

/// Something that can deliver a formatted reply to a chat
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Send `text` (Telegram HTML) to `chat_id`
    async fn send_reply(&self, chat_id: ChatId, text: String) -> Result<()>;
}

#[async_trait]
impl ReplySink for Bot {
    async fn send_reply(&self, chat_id: ChatId, text: String) -> Result<()> {
        self.send_message(chat_id, text)
            .parse_mode(ParseMode::Html)
            .await?;
        Ok(())
    }
}
