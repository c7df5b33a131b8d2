//! Mail configuration loaded from the environment.

/// Default SMTP port (STARTTLS).
const DEFAULT_SMTP_PORT: u16 = 587;

/// Default sender when `EMAIL_FROM` is not set.
const DEFAULT_FROM_ADDRESS: &str = "Clinic <noreply@clinic.local>";

/// Which transport delivers mail.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportConfig {
    /// JSON POST to an email-delivery API with a bearer key.
    HttpApi { url: String, api_key: String },
    Smtp {
        host: String,
        port: u16,
        user: Option<String>,
        password: Option<String>,
    },
    Disabled,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    /// RFC 5322 "From" mailbox.
    pub from_address: String,
    pub transport: TransportConfig,
}

impl MailConfig {
    /// Load configuration from environment variables.
    ///
    /// The HTTP API wins when both its URL and key are set; otherwise SMTP
    /// is used when `SMTP_HOST` is set; otherwise delivery is disabled and
    /// every send fails.
    ///
    /// | Variable        | Required | Default                          |
    /// |-----------------|----------|----------------------------------|
    /// | `EMAIL_API_URL` | no       | --                               |
    /// | `EMAIL_API_KEY` | no       | --                               |
    /// | `SMTP_HOST`     | no       | --                               |
    /// | `SMTP_PORT`     | no       | `587`                            |
    /// | `SMTP_USER`     | no       | --                               |
    /// | `SMTP_PASSWORD` | no       | --                               |
    /// | `EMAIL_FROM`    | no       | `Clinic <noreply@clinic.local>`  |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| get(key).filter(|v| !v.trim().is_empty());

        let transport = match (non_empty("EMAIL_API_URL"), non_empty("EMAIL_API_KEY")) {
            (Some(url), Some(api_key)) => TransportConfig::HttpApi { url, api_key },
            _ => match non_empty("SMTP_HOST") {
                Some(host) => TransportConfig::Smtp {
                    host,
                    port: non_empty("SMTP_PORT")
                        .and_then(|p| p.parse().ok())
                        .unwrap_or(DEFAULT_SMTP_PORT),
                    user: non_empty("SMTP_USER"),
                    password: non_empty("SMTP_PASSWORD"),
                },
                None => TransportConfig::Disabled,
            },
        };

        Self {
            from_address: non_empty("EMAIL_FROM")
                .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
            transport,
        }
    }
}
