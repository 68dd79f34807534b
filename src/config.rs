use crate::error::{Error, Result};
use crate::models::preference::Theme;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchProviderKind {
    Mock,
    Http,
}

impl FromStr for SearchProviderKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mock" => Ok(Self::Mock),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown search provider '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub storage_dir: PathBuf,
    pub search_provider: SearchProviderKind,
    pub search_api_url: Option<String>,
    pub search_api_key: Option<String>,
    pub search_delay_ms: u64,
    pub search_timeout_secs: u64,
    pub public_rps: u32,
    pub default_theme: Theme,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let config = Self {
            server_address: get_env_or("SERVER_ADDRESS", "127.0.0.1:8080"),
            storage_dir: PathBuf::from(get_env_or("STORAGE_DIR", "./data")),
            search_provider: get_env_parse_or("SEARCH_PROVIDER", SearchProviderKind::Mock)?,
            search_api_url: get_env_opt("SEARCH_API_URL"),
            search_api_key: get_env_opt("SEARCH_API_KEY"),
            search_delay_ms: get_env_parse_or("SEARCH_DELAY_MS", 1000)?,
            search_timeout_secs: get_env_parse_or("SEARCH_TIMEOUT_SECS", 30)?,
            public_rps: get_env_parse_or("PUBLIC_RPS", 50)?,
            default_theme: get_env_parse_or("DEFAULT_THEME", Theme::Dark)?,
            log_format: get_env_parse_or("LOG_FORMAT", LogFormat::Text)?,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.search_provider == SearchProviderKind::Http {
            if self.search_api_url.is_none() {
                return Err(Error::Config(
                    "SEARCH_API_URL is required when SEARCH_PROVIDER=http".to_string(),
                ));
            }
            if self.search_api_key.is_none() {
                return Err(Error::Config(
                    "SEARCH_API_KEY is required when SEARCH_PROVIDER=http".to_string(),
                ));
            }
        }
        Ok(())
    }
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
