use crate::core::client::{ApiClient, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY, DEFAULT_TIMEOUT};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_email, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub content: ContentConfig,
    pub mail: Option<MailConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_ms: Option<u64>,
    pub retries: Option<u32>,
    pub retry_delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub api_url: String,
    pub api_key: String,
    pub inbox: String,
    #[serde(default = "default_sender")]
    pub sender: String,
}

fn default_sender() -> String {
    "no-reply@he2b.be".to_string()
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SiteError::InvalidConfigValueError {
            field: "toml_parsing".to_string(),
            value: String::new(),
            reason: format!("TOML parsing error: {}", e),
        })
    }

    /// Deployment configuration straight from the environment. The content
    /// API URL is required; mail delivery is only enabled when the mail API
    /// variables are all present.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("CONTENT_API_URL").map_err(|_| SiteError::ConfigError {
            message: "CONTENT_API_URL is not set".to_string(),
        })?;

        let content = ContentConfig {
            base_url,
            token: std::env::var("CONTENT_API_TOKEN").ok(),
            timeout_ms: env_number("CONTENT_API_TIMEOUT_MS")?,
            retries: env_number("CONTENT_API_RETRIES")?,
            retry_delay_ms: env_number("CONTENT_API_RETRY_DELAY_MS")?,
        };

        let mail = match (
            std::env::var("MAIL_API_URL").ok(),
            std::env::var("MAIL_API_KEY").ok(),
            std::env::var("CONTACT_INBOX").ok(),
        ) {
            (Some(api_url), Some(api_key), Some(inbox)) => Some(MailConfig {
                api_url,
                api_key,
                inbox,
                sender: std::env::var("MAIL_SENDER").unwrap_or_else(|_| default_sender()),
            }),
            _ => None,
        };

        Ok(Self { content, mail })
    }
}

impl ContentConfig {
    pub fn client(&self) -> ApiClient {
        let mut client = ApiClient::new(self.base_url.clone())
            .with_timeout(
                self.timeout_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_TIMEOUT),
            )
            .with_retries(self.retries.unwrap_or(DEFAULT_RETRIES))
            .with_retry_delay(
                self.retry_delay_ms
                    .map(Duration::from_millis)
                    .unwrap_or(DEFAULT_RETRY_DELAY),
            );
        if let Some(token) = &self.token {
            client = client.with_token(token.clone());
        }
        client
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        validate_url("content.base_url", &self.content.base_url)?;

        if let Some(mail) = &self.mail {
            validate_url("mail.api_url", &mail.api_url)?;
            validate_email("mail.inbox", &mail.inbox)?;
            validate_email("mail.sender", &mail.sender)?;
            if mail.api_key.is_empty() {
                return Err(SiteError::InvalidConfigValueError {
                    field: "mail.api_key".to_string(),
                    value: String::new(),
                    reason: "API key cannot be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Replaces `${VAR_NAME}` placeholders with environment values; unknown
/// variables are left verbatim so validation can surface them.
fn substitute_env_vars(content: &str) -> String {
    use regex::Regex;
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
    })
    .to_string()
}

fn env_number<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|_| SiteError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw,
                reason: "expected a number".to_string(),
            }),
        Err(_) => Ok(None),
    }
}
