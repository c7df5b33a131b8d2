//! Delivery transports.
//!
//! No transport retries: a failed send is reported to the caller once.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Deserialize;

use crate::config::{MailConfig, TransportConfig};
use crate::error::MailError;
use crate::message::{DeliveryReceipt, EmailMessage};

/// HTTP request timeout for a single API call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Transport name reported in receipts and logs.
    fn name(&self) -> &'static str;

    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError>;
}

/// Build the transport selected by `config`.
pub fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, MailError> {
    let mailer: Arc<dyn Mailer> = match &config.transport {
        TransportConfig::HttpApi { url, api_key } => Arc::new(HttpApiMailer::new(
            url.clone(),
            api_key.clone(),
            config.from_address.clone(),
        )?),
        TransportConfig::Smtp {
            host,
            port,
            user,
            password,
        } => {
            let credentials = match (user, password) {
                (Some(u), Some(p)) => Some(Credentials::new(u.clone(), p.clone())),
                _ => None,
            };
            Arc::new(SmtpMailer::new(
                host,
                *port,
                credentials,
                config.from_address.clone(),
            )?)
        }
        TransportConfig::Disabled => Arc::new(DisabledMailer),
    };
    tracing::info!(transport = mailer.name(), "Mail transport configured");
    Ok(mailer)
}

// ---------------------------------------------------------------------------
// HTTP email API
// ---------------------------------------------------------------------------

/// Posts messages as JSON to an email-delivery API with a bearer key.
pub struct HttpApiMailer {
    client: reqwest::Client,
    url: String,
    api_key: String,
    from_address: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    id: Option<String>,
}

impl HttpApiMailer {
    pub fn new(url: String, api_key: String, from_address: String) -> Result<Self, MailError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            url,
            api_key,
            from_address,
        })
    }

    fn payload(&self, message: &EmailMessage) -> serde_json::Value {
        serde_json::json!({
            "from": self.from_address,
            "to": [message.to],
            "subject": message.subject,
            "html": message.html,
            "text": message.text,
        })
    }
}

#[async_trait]
impl Mailer for HttpApiMailer {
    fn name(&self) -> &'static str {
        "http_api"
    }

    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), to = %message.to, "Email API rejected message");
            return Err(MailError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let id = response.json::<ApiResponse>().await.ok().and_then(|r| r.id);
        tracing::info!(to = %message.to, subject = %message.subject, "Email sent via API");
        Ok(DeliveryReceipt::new(id, self.name(), &message.to))
    }
}

// ---------------------------------------------------------------------------
// SMTP
// ---------------------------------------------------------------------------

/// Sends multipart (text + HTML) messages over STARTTLS SMTP.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        port: u16,
        credentials: Option<Credentials>,
        from_address: String,
    ) -> Result<Self, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?.port(port);
        if let Some(credentials) = credentials {
            builder = builder.credentials(credentials);
        }
        Ok(Self {
            transport: builder.build(),
            from: from_address.parse()?,
        })
    }

    fn build(&self, message: &EmailMessage) -> Result<Message, MailError> {
        Message::builder()
            .from(self.from.clone())
            .to(message.to.parse()?)
            .subject(&message.subject)
            .multipart(MultiPart::alternative_plain_html(
                message.text.clone(),
                message.html.clone(),
            ))
            .map_err(|e| MailError::Build(e.to_string()))
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError> {
        let email = self.build(message)?;
        self.transport.send(email).await?;
        tracing::info!(to = %message.to, subject = %message.subject, "Email sent via SMTP");
        Ok(DeliveryReceipt::new(None, self.name(), &message.to))
    }
}

// ---------------------------------------------------------------------------
// Disabled
// ---------------------------------------------------------------------------

/// Used when no transport is configured. Every send fails.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    fn name(&self) -> &'static str {
        "disabled"
    }

    async fn send(&self, message: &EmailMessage) -> Result<DeliveryReceipt, MailError> {
        tracing::warn!(to = %message.to, "Email requested but delivery is not configured");
        Err(MailError::NotConfigured)
    }
}
