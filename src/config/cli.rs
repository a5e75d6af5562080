use crate::utils::error::Result;
use crate::utils::validation::{validate_url, Validate};
use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "he2b-content")]
#[command(about = "Fetch and inspect content sections of the HE2B site API")]
pub struct CliConfig {
    /// Content section to fetch
    #[arg(value_enum)]
    pub section: Section,

    /// Base URL of the content API (falls back to CONTENT_API_URL)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Bearer token for the content API (falls back to CONTENT_API_TOKEN)
    #[arg(long)]
    pub token: Option<String>,

    #[arg(long, default_value = "10000")]
    pub timeout_ms: u64,

    #[arg(long, default_value = "3")]
    pub retries: u32,

    #[arg(long, default_value = "1000")]
    pub retry_delay_ms: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    Campuses,
    News,
    Events,
    Services,
    Team,
    Hero,
    Partners,
    Videos,
}

impl CliConfig {
    pub fn resolved_api_url(&self) -> Option<String> {
        self.api_url
            .clone()
            .or_else(|| std::env::var("CONTENT_API_URL").ok())
    }

    pub fn resolved_token(&self) -> Option<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("CONTENT_API_TOKEN").ok())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(url) = self.resolved_api_url() {
            validate_url("api_url", &url)?;
        }
        Ok(())
    }
}
