pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use app::content::ContentApi;
pub use app::mailer::Mailer;
pub use config::{ContentConfig, MailConfig, SiteConfig};
pub use core::cache;
pub use core::client::{ApiBody, ApiClient, FetchOptions};
pub use domain::model::ContactMessage;
pub use domain::ports::ContentSource;
pub use utils::error::{Result, SiteError};
