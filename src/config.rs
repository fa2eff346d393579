use dotenv::dotenv;
use std::env;
use std::path::PathBuf;

/// Client configuration. Built once and handed to `ApiClient::new` so tests
/// can run isolated instances side by side.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the accounts API, without a trailing slash.
    pub base_url: String,
    /// File backing the durable ("remember me") session store.
    pub session_file: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, session_file: impl Into<PathBuf>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            session_file: session_file.into(),
            log_level: "info".to_string(),
        }
    }

    pub fn from_env() -> Self {
        dotenv().ok();

        let base_url =
            env::var("LEDGERDESK_API_URL").unwrap_or_else(|_| "http://localhost:8000".to_string());
        let session_file = env::var("LEDGERDESK_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_file());

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            ..Self::new(base_url, session_file)
        }
    }
}

fn default_session_file() -> PathBuf {
    env::var("HOME")
        .map(|home| PathBuf::from(home).join(".ledgerdesk").join("session.json"))
        .unwrap_or_else(|_| PathBuf::from("ledgerdesk-session.json"))
}
