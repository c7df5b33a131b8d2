//! HTML email templates.
//!
//! Each template takes its props and produces a complete [`EmailMessage`]
//! with a styled HTML body and a plain-text alternative.

use maud::{html, Markup, DOCTYPE};

use crate::message::EmailMessage;

const CLINIC_NAME: &str = "Clinic";

const STYLE: &str = "\
    body { margin: 0; padding: 0; background: #f4f6f8; font-family: Arial, Helvetica, sans-serif; color: #1f2933; }\
    .wrapper { max-width: 560px; margin: 0 auto; padding: 32px 16px; }\
    .card { background: #ffffff; border-radius: 8px; padding: 32px; }\
    h1 { font-size: 22px; margin: 0 0 16px; color: #0b4f6c; }\
    p { font-size: 15px; line-height: 1.6; margin: 0 0 16px; }\
    .code { font-size: 32px; font-weight: bold; letter-spacing: 8px; text-align: center; padding: 16px; background: #eef5f9; border-radius: 6px; }\
    .button { display: inline-block; padding: 12px 24px; background: #0b4f6c; color: #ffffff !important; text-decoration: none; border-radius: 6px; font-weight: bold; }\
    .muted { font-size: 13px; color: #6b7785; }\
    .footer { text-align: center; font-size: 12px; color: #9aa5b1; padding-top: 16px; }";

/// Minutes an OTP stays valid, as told to the recipient.
pub const OTP_VALID_MINUTES: u32 = 10;

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (STYLE) }
            }
            body {
                div.wrapper {
                    div.card {
                        (content)
                    }
                    p.footer { "© " (CLINIC_NAME) ". This is an automated message, please do not reply." }
                }
            }
        }
    }
}

fn message(to: &str, subject: String, body: Markup, text: String) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        html: layout(&subject, body).into_string(),
        subject,
        text,
    }
}

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// One-time login code.
pub fn otp(to: &str, code: &str) -> EmailMessage {
    let body = html! {
        h1 { "Your verification code" }
        p { "Use the code below to continue signing in." }
        p.code { (code) }
        p.muted {
            "This code expires in " (OTP_VALID_MINUTES) " minutes. "
            "If you did not request it, you can ignore this email."
        }
    };
    let text = format!(
        "Your verification code is {code}.\n\nIt expires in {OTP_VALID_MINUTES} minutes. \
         If you did not request it, you can ignore this email."
    );
    message(to, format!("{code} is your {CLINIC_NAME} verification code"), body, text)
}

/// Passwordless sign-in link.
pub fn magic_link(to: &str, link: &str) -> EmailMessage {
    let body = html! {
        h1 { "Sign in to " (CLINIC_NAME) }
        p { "Click the button below to sign in. The link can be used once." }
        p { a.button href=(link) { "Sign in" } }
        p.muted { "Or paste this address into your browser:" br; (link) }
    };
    let text = format!("Sign in to {CLINIC_NAME} using this link (valid once):\n\n{link}\n");
    message(to, format!("Your {CLINIC_NAME} sign-in link"), body, text)
}

/// Welcome message after registration.
pub fn welcome(to: &str, name: &str, login_url: Option<&str>) -> EmailMessage {
    let body = html! {
        h1 { "Welcome, " (name) "!" }
        p {
            "Thank you for registering with " (CLINIC_NAME) ". "
            "You can now book appointments and manage your visits online."
        }
        @if let Some(url) = login_url {
            p { a.button href=(url) { "Go to your account" } }
        }
        p.muted { "Questions? Reply to the contact address on our website." }
    };
    let mut text = format!(
        "Welcome, {name}!\n\nThank you for registering with {CLINIC_NAME}. \
         You can now book appointments and manage your visits online.\n"
    );
    if let Some(url) = login_url {
        text.push_str(&format!("\nGo to your account: {url}\n"));
    }
    message(to, format!("Welcome to {CLINIC_NAME}"), body, text)
}
