pub mod content;
pub mod mailer;
