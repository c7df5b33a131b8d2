//! Transactional email for the clinic site.
//!
//! Templates render a [`EmailMessage`]; a [`Mailer`] delivers it over an
//! HTTP email API or SMTP. Which transport is used is decided once at
//! startup by [`MailConfig::from_env`].

pub mod config;
pub mod error;
pub mod message;
pub mod templates;
pub mod transport;

pub use config::{MailConfig, TransportConfig};
pub use error::MailError;
pub use message::{DeliveryReceipt, EmailMessage};
pub use transport::{build_mailer, DisabledMailer, HttpApiMailer, Mailer, SmtpMailer};
