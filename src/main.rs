use clap::Parser;
use he2b_content::config::cli::{CliConfig, Section};
use he2b_content::utils::{logger, validation::Validate};
use he2b_content::{ApiClient, ContentApi, ContentSource, Result, SiteError};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting he2b-content CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let base_url = match config.resolved_api_url() {
        Some(url) => url,
        None => {
            eprintln!("❌ No content API URL: pass --api-url or set CONTENT_API_URL");
            std::process::exit(1);
        }
    };

    let mut client = ApiClient::new(base_url)
        .with_timeout(Duration::from_millis(config.timeout_ms))
        .with_retries(config.retries)
        .with_retry_delay(Duration::from_millis(config.retry_delay_ms));
    if let Some(token) = config.resolved_token() {
        client = client.with_token(token);
    }
    let api = ContentApi::new(client);

    match fetch_section(&api, config.section).await {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            tracing::info!("✅ Fetch completed");
        }
        Err(e) => {
            tracing::error!("❌ Fetch failed: {}", e);
            eprintln!("❌ {}", e);
            let exit_code = match e {
                SiteError::Timeout | SiteError::Api { .. } => 2,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn fetch_section(api: &ContentApi, section: Section) -> Result<serde_json::Value> {
    let value = match section {
        Section::Campuses => serde_json::to_value(api.campuses().await?)?,
        Section::News => serde_json::to_value(api.news().await?)?,
        Section::Events => serde_json::to_value(api.events().await?)?,
        Section::Services => serde_json::to_value(api.services().await?)?,
        Section::Team => serde_json::to_value(api.team_members().await?)?,
        Section::Hero => serde_json::to_value(api.hero_slides().await?)?,
        Section::Partners => serde_json::to_value(api.partners().await?)?,
        Section::Videos => serde_json::to_value(api.videos().await?)?,
    };
    Ok(value)
}
