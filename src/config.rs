// Runtime configuration, read from the environment (and `.env` if present).

use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_AI_MAX_TOKENS: u32 = 150;
const DEFAULT_SYSTEM_PROMPT: &str = "You are a humorous and friendly Discord bot.";

pub struct AppConfig {
    pub discord_token: String,
    pub data_dir: PathBuf,
    /// `None` when no API key is set; `/ai` then reports that it is unavailable.
    pub ai: Option<AiSettings>,
}

pub struct AiSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    /// Sampling temperature; `None` leaves the provider default in place.
    pub temperature: Option<f32>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let discord_token = get("DISCORD_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "Missing DISCORD_TOKEN environment variable! \
                     Create a .env file with your bot token."
                )
            })?;

        let data_dir = get("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let ai = match get("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            Some(api_key) => {
                let max_tokens = match get("AI_MAX_TOKENS") {
                    Some(raw) => raw.parse::<u32>().with_context(|| {
                        format!("AI_MAX_TOKENS must be a number, got `{}`", raw)
                    })?,
                    None => DEFAULT_AI_MAX_TOKENS,
                };
                let temperature = match get("AI_TEMPERATURE") {
                    Some(raw) => Some(parse_temperature(&raw)?),
                    None => None,
                };
                Some(AiSettings {
                    api_key,
                    base_url: get("AI_BASE_URL")
                        .unwrap_or_else(|| DEFAULT_AI_BASE_URL.to_string()),
                    model: get("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
                    system_prompt: get("AI_SYSTEM_PROMPT")
                        .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
                    max_tokens,
                    temperature,
                })
            }
            None => None,
        };

        Ok(Self {
            discord_token,
            data_dir,
            ai,
        })
    }

    /// Path of a document inside the data directory.
    pub fn document(&self, name: &str) -> PathBuf {
        self.data_dir.join(name)
    }

    pub fn ensure_data_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.data_dir).with_context(|| {
            format!(
                "Failed to create data directory `{}`",
                self.data_dir.display()
            )
        })?;
        Ok(&self.data_dir)
    }
}

/// Chat completion APIs accept temperatures from 0 to 2.
fn parse_temperature(raw: &str) -> Result<f32> {
    let value = raw
        .trim()
        .parse::<f32>()
        .with_context(|| format!("AI_TEMPERATURE must be a number, got `{}`", raw))?;
    if !(0.0..=2.0).contains(&value) {
        return Err(anyhow!("AI_TEMPERATURE must be between 0 and 2, got {}", value));
    }
    Ok(value)
}
