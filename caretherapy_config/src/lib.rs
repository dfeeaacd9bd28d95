use std::{
    net::IpAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use caretherapy_models::email_address::{EmailAddress, EmailAddressWithName};
use config::{Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Loads the configuration from the given TOML files (later files override
/// earlier ones) and finally from `CARETHERAPY_`-prefixed environment
/// variables (e.g. `CARETHERAPY_RECAPTCHA__SECRET`).
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            anyhow::Ok(builder.add_source(File::from_str(&content, FileFormat::Toml)))
        })?
        .add_source(Environment::with_prefix("CARETHERAPY").separator("__"))
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub contact: ContactConfig,
    pub recaptcha: Option<RecaptchaConfig>,
    pub email: Option<EmailConfig>,
    pub content: ContentConfig,
    pub health: HealthConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Header carrying the forwarded client address, used to key rate limit
    /// buckets. Requests without it share the `unknown` bucket.
    #[serde(default = "default_forwarded_ip_header")]
    pub forwarded_ip_header: String,
}

fn default_forwarded_ip_header() -> String {
    "x-forwarded-for".into()
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    /// Inbox receiving the business notification emails.
    pub inbox: EmailAddress,
    pub business_name: String,
    pub business_phone: String,
    pub rate_limit: RateLimitConfig,
}

#[derive(Debug, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

#[derive(Debug, Deserialize)]
pub struct RecaptchaConfig {
    pub siteverify_endpoint_override: Option<Url>,
    pub secret: String,
    /// Minimum verification score. Absent means any explicit success verdict
    /// is accepted.
    pub min_score: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub smtp_url: String,
    pub from: EmailAddressWithName,
}

#[derive(Debug, Deserialize)]
pub struct ContentConfig {
    pub posts_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct HealthConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration(pub std::time::Duration);

impl From<Duration> for std::time::Duration {
    fn from(value: Duration) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let mut total = std::time::Duration::default();
        for part in raw.split_whitespace() {
            let unit_at = part
                .find(|c: char| !c.is_ascii_digit())
                .ok_or_else(|| serde::de::Error::custom("missing duration unit"))?;
            let (number, unit) = part.split_at(unit_at);
            let number = number
                .parse::<u64>()
                .map_err(|_| serde::de::Error::custom("invalid duration"))?;
            let seconds = match unit {
                "s" => number,
                "m" => number * 60,
                "h" => number * 60 * 60,
                "d" => number * 24 * 60 * 60,
                _ => return Err(serde::de::Error::custom("invalid duration unit")),
            };
            total += std::time::Duration::from_secs(seconds);
        }
        Ok(Self(total))
    }
}
