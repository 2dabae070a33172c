//! Slash-command recognition for incoming chat messages.

use std::str::FromStr;

use thiserror::Error;

/// What a chat message asks the bot to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelegramCommand {
    /// Greeting with the list of sources.
    Start,
    /// Same reply as `Start`.
    Help,
    /// Run one comparison and reply with the report.
    Compare,
}

impl TelegramCommand {
    /// Menu entries registered with Telegram, without the leading slash.
    pub const MENU: [(&'static str, &'static str); 2] = [
        ("compare", "Compare rates and check for arbitrage"),
        ("help", "What this bot does"),
    ];
}

/// Why a message is not a usable command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandParseError {
    #[error("message does not start with a slash command")]
    NotACommand,
    #[error("`/{0}` is not a known command")]
    UnknownCommand(String),
}

impl FromStr for TelegramCommand {
    type Err = CommandParseError;

    /// Reads the first word only. `/compare@fx_bot now` is `Compare`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let name = text
            .split_whitespace()
            .next()
            .and_then(|word| word.strip_prefix('/'))
            .ok_or(CommandParseError::NotACommand)?;
        let name = name.split('@').next().unwrap_or(name);

        match name.to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "help" => Ok(Self::Help),
            "compare" => Ok(Self::Compare),
            _ => Err(CommandParseError::UnknownCommand(name.to_string())),
        }
    }
}
