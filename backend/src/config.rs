use anyhow::Context;
use std::path::{Path, PathBuf};
use studio_shared::PriceTable;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3000";
pub const DEFAULT_CONTACT_RATE_PER_MINUTE: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    /// Where contact requests are delivered.
    pub inbox: String,
    pub from: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_address: String,
    pub frontend_url: Option<String>,
    pub static_dir: Option<PathBuf>,
    pub price_table_path: Option<PathBuf>,
    pub content_dir: Option<PathBuf>,
    pub contact_rate_per_minute: u32,
    /// Key rate limits on `X-Forwarded-For` set by a reverse proxy in front.
    pub trust_forwarded_for: bool,
    pub smtp: Option<SmtpConfig>,
    pub sentry_dsn: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            frontend_url: None,
            static_dir: None,
            price_table_path: None,
            content_dir: None,
            contact_rate_per_minute: DEFAULT_CONTACT_RATE_PER_MINUTE,
            trust_forwarded_for: false,
            smtp: None,
            sentry_dsn: None,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let contact_rate_per_minute = match get("CONTACT_RATE_PER_MINUTE") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| format!("CONTACT_RATE_PER_MINUTE must be a positive integer, got {raw:?}"))?,
            None => DEFAULT_CONTACT_RATE_PER_MINUTE,
        };

        let trust_forwarded_for = match get("TRUST_FORWARDED_FOR") {
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => anyhow::bail!("TRUST_FORWARDED_FOR must be true or false, got {raw:?}"),
            },
            None => false,
        };

        // SMTP is all-or-nothing apart from the sender, which defaults to the inbox.
        let smtp = match (get("SMTP_HOST"), get("CONTACT_INBOX")) {
            (Some(host), Some(inbox)) => Some(SmtpConfig {
                host,
                username: get("SMTP_USERNAME").context("SMTP_USERNAME must be set when SMTP_HOST is")?,
                password: get("SMTP_PASSWORD").context("SMTP_PASSWORD must be set when SMTP_HOST is")?,
                from: get("MAIL_FROM").unwrap_or_else(|| inbox.clone()),
                inbox,
            }),
            (Some(_), None) => anyhow::bail!("CONTACT_INBOX must be set when SMTP_HOST is"),
            (None, _) => None,
        };

        Ok(Self {
            bind_address: get("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            frontend_url: get("FRONTEND_URL"),
            static_dir: get("STATIC_DIR").map(PathBuf::from),
            price_table_path: get("PRICE_TABLE_PATH").map(PathBuf::from),
            content_dir: get("CONTENT_DIR").map(PathBuf::from),
            contact_rate_per_minute,
            trust_forwarded_for,
            smtp,
            sentry_dsn: get("SENTRY_DSN"),
        })
    }

    pub fn load_price_table(&self) -> anyhow::Result<PriceTable> {
        match &self.price_table_path {
            Some(path) => read_price_table(path),
            None => Ok(PriceTable::default()),
        }
    }
}

pub fn read_price_table(path: &Path) -> anyhow::Result<PriceTable> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read price table {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse price table {}", path.display()))
}
