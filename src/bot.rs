use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::llm::{Completion, LlmClient};
use crate::prompt::{GREETING, SYSTEM_PROMPT};

/// Shared application state, constructed once at startup and passed into
/// handlers by reference. No per-message client construction.
pub struct AppState {
    completion: Arc<dyn Completion>,
    config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let completion = Arc::new(LlmClient::new(config.llm.clone()));
        Self { completion, config }
    }

    #[cfg(test)]
    fn with_backend(config: Config, completion: Arc<dyn Completion>) -> Self {
        Self { completion, config }
    }
}

/// Start the Telegram bot and long-poll until terminated.
pub async fn run(state: Arc<AppState>) -> Result<()> {
    let bot = Bot::new(&state.config.telegram.bot_token);

    info!("Starting Telegram bot...");

    let handler = Update::filter_message().endpoint(handle_message);

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|upd| async move {
            warn!("Unhandled update: {:?}", upd.id);
        })
        .error_handler(LoggingErrorHandler::with_custom_text("bot"))
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let text = match msg.text() {
        Some(t) => t.to_string(),
        None => return Ok(()),
    };

    info!("Message in chat {}: {}", msg.chat.id, text);

    // Handle /start command
    if text == "/start" {
        bot.send_message(msg.chat.id, GREETING).await?;
        return Ok(());
    }

    // Send "typing" indicator
    bot.send_chat_action(msg.chat.id, teloxide::types::ChatAction::Typing)
        .await
        .ok();

    match relay(&state, &text).await {
        Ok(reply) => {
            // Split long messages (Telegram has a 4096 char limit)
            for chunk in split_message(&reply, 4000) {
                // Try sending, ignore errors for individual chunks
                bot.send_message(msg.chat.id, chunk).await.ok();
            }
        }
        Err(e) => {
            error!("Completion failed: {:#}", e);
            bot.send_message(msg.chat.id, "Sorry, I could not get a response. Please try again.")
                .await?;
        }
    }

    Ok(())
}

/// One single-turn pass through the completion backend: fixed system
/// prompt, user text verbatim, reply relayed verbatim.
async fn relay(state: &AppState, text: &str) -> Result<String> {
    state.completion.complete(SYSTEM_PROMPT, text).await
}

fn split_message(text: &str, max_len: usize) -> Vec<String> {
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = (start + max_len).min(text.len());
        // Walk back to a valid UTF-8 char boundary so slicing doesn't panic
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        let actual_end = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .or_else(|| text[start..end].rfind(' '))
                .map(|pos| start + pos + 1)
                .unwrap_or(end)
        } else {
            end
        };

        chunks.push(text[start..actual_end].to_string());
        start = actual_end;
    }

    chunks
}
