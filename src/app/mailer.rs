use crate::config::site::MailConfig;
use crate::domain::model::ContactMessage;
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::Validate;
use reqwest::Client;
use std::time::Duration;

/// Delivers contact-form submissions through a transactional mail API:
/// one message to the council inbox, one auto-reply to the sender. Direct
/// call-and-response, no retry, no queueing.
pub struct Mailer {
    client: Client,
    api_url: String,
    api_key: String,
    inbox: String,
    sender: String,
}

impl Mailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: Client::new(),
            api_url: config.api_url,
            api_key: config.api_key,
            inbox: config.inbox,
            sender: config.sender,
        }
    }

    pub async fn deliver(&self, message: &ContactMessage) -> Result<()> {
        message.validate()?;

        let submission = format!(
            "<p><strong>{}</strong> &lt;{}&gt;</p><p>{}</p>",
            escape_html(&message.name),
            escape_html(&message.email),
            escape_html(&message.message).replace('\n', "<br>"),
        );
        self.send(
            &self.inbox,
            &format!("[Contact] {}", message.subject),
            &submission,
            Some(&message.email),
        )
        .await?;

        let confirmation = format!(
            "<p>Bonjour {},</p><p>Nous avons bien re\u{e7}u votre message \
             et reviendrons vers vous au plus vite.</p><p>Le Conseil \
             \u{e9}tudiant HE2B</p>",
            escape_html(&message.name),
        );
        self.send(
            &message.email,
            "Votre message a bien \u{e9}t\u{e9} re\u{e7}u",
            &confirmation,
            None,
        )
        .await?;

        tracing::info!("Contact message from {} delivered", message.email);
        Ok(())
    }

    async fn send(
        &self,
        to: &str,
        subject: &str,
        html_content: &str,
        reply_to: Option<&str>,
    ) -> Result<()> {
        let mut payload = serde_json::json!({
            "sender": { "email": self.sender },
            "to": [{ "email": to }],
            "subject": subject,
            "htmlContent": html_content,
        });
        if let Some(address) = reply_to {
            payload["replyTo"] = serde_json::json!({ "email": address });
        }

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .timeout(Duration::from_secs(10))
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SiteError::MailError {
                message: format!("mail API responded with {}", response.status()),
            });
        }
        Ok(())
    }
}

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
