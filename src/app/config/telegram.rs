//! Telegram front end settings.

use serde::Deserialize;

/// Telegram bot configuration.
///
/// The bot token is never read from the config file; it comes from
/// `TELEGRAM_BOT_TOKEN`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TelegramAppConfig {
    /// Chats allowed to run commands. Empty means any chat.
    pub allowed_chat_ids: Vec<i64>,
    #[serde(skip)]
    pub bot_token: Option<String>,
}

impl TelegramAppConfig {
    #[must_use]
    pub fn is_allowed(&self, chat_id: i64) -> bool {
        self.allowed_chat_ids.is_empty() || self.allowed_chat_ids.contains(&chat_id)
    }
}
