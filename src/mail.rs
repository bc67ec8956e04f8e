use serde::Serialize;
use thiserror::Error;

use crate::config::EmailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email service not configured. Please add an email provider API key to your environment variables.")]
    NotConfigured,
    /// The provider accepted the request but rejected the message; carries
    /// the provider's own error text.
    #[error("{0}")]
    Provider(String),
    #[error("Failed to reach email provider: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Relay for operator notifications through the transactional email
/// provider. Pure pass-through: one POST per message, no queueing, no
/// retries.
pub struct Mailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    contact_address: String,
    from_contact: String,
    from_newsletter: String,
}

#[derive(Debug, Serialize)]
struct OutgoingEmail<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

impl Mailer {
    /// `api_key: None` leaves the relay unconfigured; both endpoints then
    /// answer with the fixed not-configured error.
    pub fn new(config: &EmailConfig, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            contact_address: config.contact_address.clone(),
            from_contact: config.from_contact.clone(),
            from_newsletter: config.from_newsletter.clone(),
        }
    }

    /// Forward a contact-form inquiry to the operator, with the visitor's
    /// address as reply-to. Returns the provider's message id.
    pub async fn send_contact_inquiry(
        &self,
        name: &str,
        email: &str,
        subject: Option<&str>,
        message: &str,
    ) -> Result<String, MailError> {
        let subject = match subject.filter(|s| !s.trim().is_empty()) {
            Some(subject) => subject.to_string(),
            None => format!("New Inquiry from {name}"),
        };
        let html = contact_html(name, email, &subject, message);

        self.send(&self.from_contact, &subject, &html, Some(email))
            .await
    }

    /// Notify the operator about a new newsletter subscriber.
    pub async fn send_newsletter_signup(&self, email: &str) -> Result<String, MailError> {
        let html = newsletter_html(email);
        self.send(&self.from_newsletter, "New Newsletter Subscription", &html, None)
            .await
    }

    async fn send(
        &self,
        from: &str,
        subject: &str,
        html: &str,
        reply_to: Option<&str>,
    ) -> Result<String, MailError> {
        let Some(api_key) = &self.api_key else {
            return Err(MailError::NotConfigured);
        };

        let response = self
            .client
            .post(format!("{}/emails", self.endpoint))
            .bearer_auth(api_key)
            .json(&OutgoingEmail {
                from,
                to: [self.contact_address.as_str()],
                subject,
                html,
                reply_to,
            })
            .send()
            .await?;

        let status = response.status();
        let body: serde_json::Value = response.json().await.unwrap_or_default();

        if !status.is_success() {
            let message = body
                .get("message")
                .and_then(|message| message.as_str())
                .unwrap_or("Email provider rejected the message");
            return Err(MailError::Provider(message.to_string()));
        }

        Ok(body
            .get("id")
            .and_then(|id| id.as_str())
            .unwrap_or_default()
            .to_string())
    }
}

fn contact_html(name: &str, email: &str, subject: &str, message: &str) -> String {
    format!(
        "<div style=\"font-family: serif; max-width: 600px; margin: 0 auto;\">\
         <h2>New Contact Inquiry</h2>\
         <table>\
         <tr><td><strong>Name:</strong></td><td>{name}</td></tr>\
         <tr><td><strong>Email:</strong></td><td>{email}</td></tr>\
         <tr><td><strong>Subject:</strong></td><td>{subject}</td></tr>\
         </table>\
         <h3>Message</h3>\
         <blockquote>{message}</blockquote>\
         </div>"
    )
}

fn newsletter_html(email: &str) -> String {
    format!(
        "<div style=\"font-family: serif; max-width: 600px; margin: 0 auto;\">\
         <h2>New Subscriber</h2>\
         <p>{email}</p>\
         </div>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_mailer_reports_fixed_error() {
        let mailer = Mailer::new(&EmailConfig::default(), None);
        let result = mailer
            .send_contact_inquiry("Ada", "ada@example.com", None, "Hello")
            .await;
        assert!(matches!(result, Err(MailError::NotConfigured)));
    }

    #[test]
    fn test_contact_html_includes_fields() {
        let html = contact_html("Ada", "ada@example.com", "Prototype run", "Hello");
        assert!(html.contains("Ada"));
        assert!(html.contains("ada@example.com"));
        assert!(html.contains("Prototype run"));
    }
}
