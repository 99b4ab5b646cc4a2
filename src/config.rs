use std::{env, path::PathBuf, time::Duration};

use log::LevelFilter;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub admin_email: String,
    pub admin_password: String,
    pub jwt_secret: String,
    pub session_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: LevelFilter,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            admin_email: "admin@example.com".to_string(),
            admin_password: "password123".to_string(),
            jwt_secret: "secret".to_string(),
            session_file: PathBuf::from(".quiz-admin-session"),
            log_dir: PathBuf::from("log"),
            log_level: LevelFilter::Info,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    /// Loads `.env` when there is one, then reads the `QUIZ_*` variables.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        Config::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup("QUIZ_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(email) = lookup("QUIZ_ADMIN_EMAIL") {
            config.admin_email = email;
        }
        if let Some(password) = lookup("QUIZ_ADMIN_PASSWORD") {
            config.admin_password = password;
        }
        if let Some(secret) = lookup("QUIZ_JWT_SECRET") {
            config.jwt_secret = secret;
        }
        if let Some(path) = lookup("QUIZ_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }
        if let Some(path) = lookup("QUIZ_LOG_DIR") {
            config.log_dir = PathBuf::from(path);
        }
        if let Some(level) = lookup("QUIZ_LOG_LEVEL") {
            config.log_level = level.parse().map_err(|_| ConfigError::Invalid {
                name: "QUIZ_LOG_LEVEL",
                expected: "one of off, error, warn, info, debug, trace",
                value: level.clone(),
            })?;
        }
        if let Some(secs) = lookup("QUIZ_REQUEST_TIMEOUT_SECS") {
            let parsed = secs
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid {
                    name: "QUIZ_REQUEST_TIMEOUT_SECS",
                    expected: "a positive number of seconds",
                    value: secs.clone(),
                })?;
            config.request_timeout = Duration::from_secs(parsed);
        }

        Ok(config)
    }
}
