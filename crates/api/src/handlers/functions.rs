//! Stateless email functions under `/functions`.
//!
//! Each function parses its JSON body by hand so that every failure,
//! malformed JSON included, answers with the same
//! `{ "success": false, "error": ... }` shape and status 500. Responses
//! carry permissive CORS headers so the functions can be called from any
//! origin.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_ORIGIN};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use clinic_mail::{templates, DeliveryReceipt, EmailMessage, MailError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use crate::state::AppState;

pub const CORS_ALLOW_ORIGIN: &str = "*";
pub const CORS_ALLOW_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

pub const OTP_REQUIRED: &str = "Email and OTP are required";
pub const MAGIC_LINK_REQUIRED: &str = "Email and magic link are required";
pub const WELCOME_REQUIRED: &str = "Email and name are required";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum FunctionError {
    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("{0}")]
    MissingFields(&'static str),

    #[error(transparent)]
    Delivery(#[from] MailError),
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Email function failed");
        let body = json!({ "success": false, "error": self.to_string() });
        with_cors((StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response())
    }
}

fn with_cors(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static(CORS_ALLOW_ORIGIN),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(CORS_ALLOW_HEADERS),
    );
    response
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
struct OtpRequest {
    email: Option<String>,
    otp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct MagicLinkRequest {
    email: Option<String>,
    #[serde(alias = "magicLink")]
    magic_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WelcomeRequest {
    email: Option<String>,
    name: Option<String>,
    #[serde(alias = "loginUrl")]
    login_url: Option<String>,
}

/// An empty body parses as `T::default()`.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, FunctionError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    Ok(serde_json::from_slice(body)?)
}

/// A present, non-blank field.
fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

async fn deliver(
    state: &AppState,
    message: EmailMessage,
    success_message: &str,
) -> Result<Response, FunctionError> {
    let receipt: DeliveryReceipt = state.mailer.send(&message).await?;
    tracing::info!(
        to = %receipt.to,
        transport = receipt.transport,
        message_id = %receipt.id,
        "Email function delivered message"
    );
    let body = json!({
        "success": true,
        "message": success_message,
        "details": receipt,
    });
    Ok(with_cors((StatusCode::OK, Json(body)).into_response()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// OPTIONS /functions/*
///
/// Empty 200 with the CORS headers.
pub async fn preflight() -> Response {
    with_cors(StatusCode::OK.into_response())
}

/// POST /functions/send-otp
pub async fn send_otp(State(state): State<AppState>, body: Bytes) -> Result<Response, FunctionError> {
    let input: OtpRequest = parse_body(&body)?;
    let (Some(email), Some(otp)) = (required(input.email), required(input.otp)) else {
        return Err(FunctionError::MissingFields(OTP_REQUIRED));
    };
    deliver(&state, templates::otp(&email, &otp), "OTP email sent successfully").await
}

/// POST /functions/send-magic-link
pub async fn send_magic_link(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, FunctionError> {
    let input: MagicLinkRequest = parse_body(&body)?;
    let (Some(email), Some(link)) = (required(input.email), required(input.magic_link)) else {
        return Err(FunctionError::MissingFields(MAGIC_LINK_REQUIRED));
    };
    deliver(
        &state,
        templates::magic_link(&email, &link),
        "Magic link email sent successfully",
    )
    .await
}

/// POST /functions/send-welcome
pub async fn send_welcome(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, FunctionError> {
    let input: WelcomeRequest = parse_body(&body)?;
    let (Some(email), Some(name)) = (required(input.email), required(input.name)) else {
        return Err(FunctionError::MissingFields(WELCOME_REQUIRED));
    };
    let login_url = required(input.login_url);
    deliver(
        &state,
        templates::welcome(&email, &name, login_url.as_deref()),
        "Welcome email sent successfully",
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_parses_as_default() {
        let parsed: OtpRequest = parse_body(&Bytes::from_static(b"  \n")).unwrap();
        assert!(parsed.email.is_none());
        assert!(parsed.otp.is_none());
    }

    #[test]
    fn malformed_body_is_an_error() {
        let result: Result<OtpRequest, _> = parse_body(&Bytes::from_static(b"{email"));
        assert!(matches!(result, Err(FunctionError::InvalidBody(_))));
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let parsed: MagicLinkRequest =
            parse_body(&Bytes::from_static(br#"{"email":"a@b.com","magicLink":"https://x"}"#))
                .unwrap();
        assert_eq!(parsed.magic_link.as_deref(), Some("https://x"));
    }

    #[test]
    fn blank_fields_are_missing() {
        assert_eq!(required(Some("  ".into())), None);
        assert_eq!(required(Some(" a ".into())).as_deref(), Some("a"));
    }

    #[test]
    fn error_response_has_cors_headers() {
        let response = FunctionError::MissingFields(OTP_REQUIRED).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            response.headers()[ACCESS_CONTROL_ALLOW_HEADERS],
            CORS_ALLOW_HEADERS
        );
    }
}
