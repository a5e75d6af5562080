use crate::domain::model::ContactMessage;
use crate::utils::error::{Result, SiteError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SiteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteError::ValidationError {
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

pub fn validate_email(field_name: &str, address: &str) -> Result<()> {
    use regex::Regex;
    let re = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();

    if !re.is_match(address) {
        return Err(SiteError::ValidationError {
            message: format!("{} is not a valid email address: {}", field_name, address),
        });
    }
    Ok(())
}

impl Validate for ContactMessage {
    fn validate(&self) -> Result<()> {
        validate_non_empty("name", &self.name)?;
        validate_email("email", &self.email)?;
        validate_non_empty("subject", &self.subject)?;
        validate_non_empty("message", &self.message)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Alex Dupont".to_string(),
            email: "alex@example.be".to_string(),
            subject: "Question about the ISIB campus".to_string(),
            message: "Hello, I would like to know more.".to_string(),
        }
    }

    #[test]
    fn accepts_http_and_https_urls() {
        assert!(validate_url("api_url", "https://api.he2b.be").is_ok());
        assert!(validate_url("api_url", "http://localhost:1337").is_ok());
    }

    #[test]
    fn rejects_empty_and_non_http_urls() {
        assert!(validate_url("api_url", "").is_err());
        assert!(validate_url("api_url", "ftp://api.he2b.be").is_err());
        assert!(validate_url("api_url", "not a url").is_err());
    }

    #[test]
    fn valid_contact_message_passes() {
        assert!(message().validate().is_ok());
    }

    #[test]
    fn contact_message_requires_valid_email() {
        let mut msg = message();
        msg.email = "not-an-address".to_string();
        assert!(msg.validate().is_err());
    }

    #[test]
    fn contact_message_rejects_blank_fields() {
        let mut msg = message();
        msg.message = "   ".to_string();
        assert!(msg.validate().is_err());
    }
}
