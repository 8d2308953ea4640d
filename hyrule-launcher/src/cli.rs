use backend::relay::{DEFAULT_API_BASE, DEFAULT_MODEL, DEFAULT_PERSONA, RelaySettings};
use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "hyrule-launcher",
    about = "Hyrule character lookup and chat relay server"
)]
pub struct Cli {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
    /// Chat is disabled when this is unset or blank.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_API_BASE)]
    pub gemini_base_url: String,
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub gemini_model: String,
    /// Upper bound on one outbound Gemini call.
    #[arg(
        long,
        env = "CHAT_TIMEOUT_SECS",
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub chat_timeout_secs: u64,
    /// Text prepended to every chat message.
    #[arg(long, env = "PERSONA_PROMPT", default_value = DEFAULT_PERSONA)]
    pub persona: String,
    /// JSON catalog to serve instead of the built-in one.
    #[arg(long, env = "CATALOG_PATH")]
    pub catalog_path: Option<PathBuf>,
}

impl Cli {
    pub fn relay_settings(&self) -> Option<RelaySettings> {
        let mut settings = RelaySettings::from_key(self.gemini_api_key.as_deref())?;
        settings.api_base = self.gemini_base_url.clone();
        settings.model = self.gemini_model.clone();
        settings.timeout = Duration::from_secs(self.chat_timeout_secs);
        settings.persona = self.persona.clone();
        Some(settings)
    }
}
