use anyhow::{Context, Result};

/// Telegram bot token, read from `TGBOT_APIKEY`.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
}

/// Chat-completion API credentials, read from `DS_APIKEY` / `DS_BASE_URL`.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram: TelegramConfig,
    pub llm: LlmConfig,
}

fn required(name: &str) -> Result<String> {
    std::env::var(name)
        .with_context(|| format!("Missing required environment variable: {}", name))
}

impl Config {
    /// Read all required values from the process environment.
    ///
    /// Presence is the only validation; format and reachability of the
    /// endpoint are left to the first real request.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            telegram: TelegramConfig {
                bot_token: required("TGBOT_APIKEY")?,
            },
            llm: LlmConfig {
                api_key: required("DS_APIKEY")?,
                base_url: required("DS_BASE_URL")?,
            },
        })
    }
}
