//! Relays contact-form messages through the EmailJS REST API.
//!
//! Independent of the statistics engine.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::config::ContactConfig;
use crate::error::{Error, Result};

pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
pub const SUCCESS_MESSAGE: &str = "Message sent successfully! I'll get back to you soon.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<()> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("subject", &self.subject),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(Error::InvalidContact(format!("missing {}", missing.join(", "))));
        }
        if !self.email.contains('@') {
            return Err(Error::InvalidContact(format!(
                "'{}' is not an email address",
                self.email
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayOutcome {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: BTreeMap<&'static str, String>,
}

/// Template parameters for a message delivered to `recipient`. The provider's
/// templates read the recipient under several names.
pub fn template_params(recipient: &str, msg: &ContactMessage) -> BTreeMap<&'static str, String> {
    let mut params = BTreeMap::new();
    params.insert("from_name", msg.name.clone());
    params.insert("from_email", msg.email.clone());
    params.insert("subject", msg.subject.clone());
    params.insert("message", msg.message.clone());
    params.insert("reply_to", msg.email.clone());
    for key in ["to_email", "user_email", "send_to", "email", "recipient", "to"] {
        params.insert(key, recipient.to_string());
    }
    params
}

pub struct EmailJsRelay {
    client: Client,
    config: ContactConfig,
    endpoint: String,
}

impl EmailJsRelay {
    pub fn new(config: ContactConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            config,
            endpoint: EMAILJS_SEND_URL.to_string(),
        })
    }

    /// Sends `msg` to the site owner, then a thank-you to the visitor when a
    /// follow-up template is configured. Only the first delivery can fail the
    /// call.
    pub async fn send(&self, msg: &ContactMessage) -> Result<RelayOutcome> {
        msg.validate()?;

        let to_owner = template_params(&self.config.receiver_email, msg);
        self.deliver(&self.config.template_id, to_owner).await?;
        tracing::info!("Relayed contact message from {}", msg.email);

        if let Some(followup) = &self.config.followup_template_id {
            let to_visitor = template_params(&msg.email, msg);
            if let Err(e) = self.deliver(followup, to_visitor).await {
                tracing::warn!("Follow-up email to {} failed: {}", msg.email, e);
            }
        }

        Ok(RelayOutcome {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        })
    }

    async fn deliver(
        &self,
        template_id: &str,
        template_params: BTreeMap<&'static str, String>,
    ) -> Result<()> {
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id,
            user_id: &self.config.public_key,
            template_params,
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                "Failed to send email".to_string()
            } else {
                text
            };
            return Err(Error::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Nice site".to_string(),
        }
    }

    #[test]
    fn test_validate_accepts_complete_message() {
        assert!(message().validate().is_ok());
    }

    #[test]
    fn test_validate_lists_missing_fields() {
        let mut msg = message();
        msg.subject = "  ".to_string();
        msg.message.clear();
        match msg.validate() {
            Err(Error::InvalidContact(reason)) => assert_eq!(reason, "missing subject, message"),
            other => panic!("expected InvalidContact, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_address() {
        let mut msg = message();
        msg.email = "ada".to_string();
        assert!(matches!(msg.validate(), Err(Error::InvalidContact(_))));
    }

    #[test]
    fn test_owner_params_reply_to_visitor() {
        let params = template_params("owner@example.com", &message());
        assert_eq!(params["to_email"], "owner@example.com");
        assert_eq!(params["recipient"], "owner@example.com");
        assert_eq!(params["reply_to"], "ada@example.com");
        assert_eq!(params["from_name"], "Ada");
        assert_eq!(params.len(), 11);
    }

    #[test]
    fn test_send_request_shape() {
        let body = SendRequest {
            service_id: "svc",
            template_id: "tpl",
            user_id: "key",
            template_params: template_params("owner@example.com", &message()),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["service_id"], "svc");
        assert_eq!(json["template_params"]["subject"], "Hello");
    }

    #[tokio::test]
    async fn test_invalid_message_is_rejected_before_sending() {
        let config = ContactConfig {
            service_id: "svc".to_string(),
            template_id: "tpl".to_string(),
            public_key: "key".to_string(),
            receiver_email: "owner@example.com".to_string(),
            followup_template_id: None,
        };
        let mut relay = EmailJsRelay::new(config, Duration::from_secs(1)).unwrap();
        relay.endpoint = "http://127.0.0.1:9/unreachable".to_string();

        let mut msg = message();
        msg.name.clear();
        assert!(matches!(relay.send(&msg).await, Err(Error::InvalidContact(_))));
    }
}
