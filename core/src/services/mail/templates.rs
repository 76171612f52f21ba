//! Plain-text email templates
//!
//! Subjects are a single line; mail headers cannot carry line breaks.

use crate::domain::value_objects::SiteContext;

use super::traits::EmailMessage;

/// Email sent after registration with the activation link
pub fn activation_email(site: &SiteContext, email: &str, token: &str) -> EmailMessage {
    let subject = format!("Activate your account on {}", site.domain);
    let body = format!(
        "Hello {email},\n\
         \n\
         Thank you for registering on {domain}.\n\
         Please open the link below to complete your registration:\n\
         \n\
         {url}\n\
         \n\
         If you did not register, you can ignore this email.\n",
        email = email,
        domain = site.domain,
        url = site.activation_url(token),
    );

    EmailMessage {
        to: email.to_string(),
        subject: single_line(&subject),
        body,
    }
}

/// Email carrying a password reset link
pub fn password_reset_email(site: &SiteContext, email: &str, token: &str) -> EmailMessage {
    let subject = format!("Password reset on {}", site.domain);
    let body = format!(
        "Hello {email},\n\
         \n\
         A password reset was requested for your account on {domain}.\n\
         Open the link below to choose a new password:\n\
         \n\
         {url}\n\
         \n\
         If you did not request this, no action is needed.\n",
        email = email,
        domain = site.domain,
        url = site.password_reset_url(token),
    );

    EmailMessage {
        to: email.to_string(),
        subject: single_line(&subject),
        body,
    }
}

fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
