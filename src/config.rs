use std::{env, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_VIEWS_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_REDIRECT_MS: u64 = 400;
pub const DEFAULT_PORT: u16 = 8080;

/// Which route table the client runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// login / register / recover / dashboard, tasks synced with the API.
    Accounts,
    /// home / board, tasks kept only in the page.
    Todo,
}

impl Variant {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "accounts" => Some(Self::Accounts),
            "todo" => Some(Self::Todo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub views_url: String,
    pub variant: Variant,
    pub redirect_delay: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let variant = match env::var("TASKBOARD_VARIANT") {
            Ok(raw) => Variant::parse(&raw).unwrap_or_else(|| {
                warn!("unknown TASKBOARD_VARIANT `{raw}`, using accounts");
                Variant::Accounts
            }),
            Err(_) => Variant::Accounts,
        };

        Self {
            api_url: url_var("TASKBOARD_API_URL", DEFAULT_API_URL),
            views_url: url_var("TASKBOARD_VIEWS_URL", DEFAULT_VIEWS_URL),
            variant,
            redirect_delay: Duration::from_millis(parsed_var(
                "TASKBOARD_REDIRECT_MS",
                DEFAULT_REDIRECT_MS,
            )),
        }
    }

    pub fn new(api_url: impl Into<String>, variant: Variant) -> Self {
        Self {
            api_url: trim_base(api_url.into()),
            views_url: DEFAULT_VIEWS_URL.to_string(),
            variant,
            redirect_delay: Duration::from_millis(DEFAULT_REDIRECT_MS),
        }
    }
}

/// Port for the fragment host binary.
pub fn resolve_port() -> u16 {
    parsed_var("PORT", DEFAULT_PORT)
}

fn url_var(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => trim_base(value),
        _ => {
            info!("{key} not set, using default: {default}");
            default.to_string()
        }
    }
}

fn parsed_var<T: std::str::FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("invalid {key} value `{value}`, using default: {default}");
            default
        }),
        Err(_) => default,
    }
}

fn trim_base(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_parse_is_case_insensitive() {
        assert_eq!(Variant::parse(" TODO "), Some(Variant::Todo));
        assert_eq!(Variant::parse("accounts"), Some(Variant::Accounts));
        assert_eq!(Variant::parse("kanban"), None);
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = Config::new("http://api.local/", Variant::Todo);
        assert_eq!(config.api_url, "http://api.local");
    }
}
