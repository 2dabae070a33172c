//! Long-polling Telegram bot that answers `/compare`.

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};
use tracing::{error, info, warn};

use super::command::{CommandParseError, TelegramCommand};
use super::format::{format_report, welcome_text, APOLOGY_TEXT, WAIT_TEXT};
use crate::app::config::TelegramAppConfig;
use crate::app::{CompareService, Config};
use crate::error::{ConfigError, Result};

/// Start the bot and serve commands until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let token = config
        .telegram
        .bot_token
        .clone()
        .ok_or(ConfigError::MissingField {
            field: "TELEGRAM_BOT_TOKEN",
        })?;

    let service = Arc::new(CompareService::from_config(&config)?);
    let route = service.route();
    let welcome = Arc::new(welcome_text(
        &route.target().to_string(),
        (
            &route.first_leg().to_string(),
            &route.second_leg().to_string(),
        ),
        &service.source_ids(),
    ));
    let access = Arc::new(config.telegram.clone());

    let bot = Bot::new(token);
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    info!(
        allowed_chats = access.allowed_chat_ids.len(),
        "Telegram bot started"
    );

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let service = Arc::clone(&service);
        let welcome = Arc::clone(&welcome);
        let access = Arc::clone(&access);
        async move {
            if let Some(text) = msg.text() {
                handle_message(&bot, &msg, text, &service, &welcome, &access).await;
            }
            respond(())
        }
    })
    .await;

    info!("Telegram bot stopped");
    Ok(())
}

async fn handle_message(
    bot: &Bot,
    msg: &Message,
    text: &str,
    service: &CompareService,
    welcome: &str,
    access: &TelegramAppConfig,
) {
    let chat_id = msg.chat.id;
    let command = match text.parse::<TelegramCommand>() {
        Ok(command) => command,
        Err(CommandParseError::NotACommand) => return,
        Err(e) => {
            info!(chat_id = chat_id.0, error = %e, "Ignoring message");
            return;
        }
    };

    if !access.is_allowed(chat_id.0) {
        warn!(chat_id = chat_id.0, "Command from chat outside the allow list");
        return;
    }

    match command {
        TelegramCommand::Start | TelegramCommand::Help => {
            info!(chat_id = chat_id.0, "Welcome requested");
            if let Err(e) = bot.send_message(chat_id, welcome).await {
                error!(error = %e, "Failed to send welcome message");
            }
        }
        TelegramCommand::Compare => {
            info!(chat_id = chat_id.0, "Received /compare");
            if let Err(e) = compare(bot, chat_id, service).await {
                error!(chat_id = chat_id.0, error = %e, "Failed to answer /compare");
            }
        }
    }
}

/// Post the wait message, run the comparison, then replace the wait message
/// with the report (or apologise).
async fn compare(
    bot: &Bot,
    chat_id: ChatId,
    service: &CompareService,
) -> std::result::Result<(), teloxide::RequestError> {
    let waiting = bot.send_message(chat_id, WAIT_TEXT).await?;

    let report = match service.compare().await {
        Ok(report) => report,
        Err(e) => {
            error!(chat_id = chat_id.0, error = %e, "Comparison failed");
            bot.send_message(chat_id, APOLOGY_TEXT).await?;
            return Ok(());
        }
    };

    let text = format_report(&report);
    let edited = bot
        .edit_message_text(chat_id, waiting.id, &text)
        .parse_mode(ParseMode::MarkdownV2)
        .await;
    if let Err(e) = edited {
        warn!(error = %e, "Could not edit wait message, sending a new one");
        bot.send_message(chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .await?;
    }

    info!(chat_id = chat_id.0, "Sent comparison");
    Ok(())
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> std::result::Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = TelegramCommand::MENU
        .into_iter()
        .map(|(name, description)| BotCommand::new(name, description))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
