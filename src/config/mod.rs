#[cfg(feature = "cli")]
pub mod cli;
pub mod site;

pub use site::{ContentConfig, MailConfig, SiteConfig};
