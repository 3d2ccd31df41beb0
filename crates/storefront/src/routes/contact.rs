//! Contact form route handlers.
//!
//! Messages are not delivered anywhere. A valid submission is logged and
//! acknowledged with a toast.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::IntoResponse, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use hc_core::Email;

use crate::context::PageContext;
use crate::error::Result;
use crate::filters;
use crate::toast;

const CONTACT_PATH: &str = "/contato";

/// Contact form data.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

/// Result of checking a submitted form.
#[derive(Debug, PartialEq, Eq)]
enum Verdict {
    Incomplete,
    BadEmail,
    Accepted(Email),
}

impl ContactForm {
    fn verdict(&self) -> Verdict {
        let fields = [&self.name, &self.email, &self.message];
        if fields.iter().any(|field| field.trim().is_empty()) {
            return Verdict::Incomplete;
        }
        Email::parse(self.email.trim()).map_or(Verdict::BadEmail, Verdict::Accepted)
    }
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub page: PageContext,
}

/// Display the contact form.
#[instrument(skip_all)]
pub async fn show(page: PageContext) -> impl IntoResponse {
    ContactTemplate { page }
}

/// Check and acknowledge a contact message.
#[instrument(skip_all)]
pub async fn submit(session: Session, Form(form): Form<ContactForm>) -> Result<Redirect> {
    let message = match form.verdict() {
        Verdict::Incomplete => toast::CONTACT_INCOMPLETE,
        Verdict::BadEmail => toast::CONTACT_BAD_EMAIL,
        Verdict::Accepted(email) => {
            tracing::info!(
                name = form.name.trim(),
                email = %email,
                length = form.message.trim().chars().count(),
                "Contact message received"
            );
            toast::CONTACT_SENT
        }
    };
    toast::push(&session, message).await?;
    Ok(Redirect::to(CONTACT_PATH))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_blank_fields() {
        assert_eq!(ContactForm::default().verdict(), Verdict::Incomplete);
        assert_eq!(
            form("Ana", "ana@example.com", "   ").verdict(),
            Verdict::Incomplete
        );
        assert_eq!(form(" ", "not-an-email", "Oi").verdict(), Verdict::Incomplete);
    }

    #[test]
    fn test_bad_email() {
        assert_eq!(form("Ana", "ana@", "Oi").verdict(), Verdict::BadEmail);
        assert_eq!(form("Ana", "ana.example.com", "Oi").verdict(), Verdict::BadEmail);
    }

    #[test]
    fn test_accepted() {
        assert_eq!(
            form(" Ana ", " Ana@Example.com ", "Vocês abrem domingo?").verdict(),
            Verdict::Accepted(Email::parse("ana@example.com").unwrap())
        );
    }
}
