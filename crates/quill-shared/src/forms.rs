//! Submitted form bodies and their validation.
//!
//! Each form validates structurally (required fields, well-formed values)
//! and returns every failing field at once so the page can render inline
//! errors next to each input.

use serde::{Deserialize, Serialize};
use url::Url;

/// A single failed field with its user-facing message. Never leaves the
/// process, so it stays out of serde entirely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All validation failures for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(pub Vec<FieldError>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Message for a given field, if it failed.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    fn require(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.push(field, message);
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Post authoring form, used by both the new-post and edit-post pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub img_url: String,
    #[serde(default)]
    pub body: String,
}

impl PostForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("title", &self.title, "Please enter a title");
        errors.require("subtitle", &self.subtitle, "Please enter a subtitle");
        errors.require("body", &self.body, "Please enter a post");
        if self.img_url.trim().is_empty() {
            errors.push("img_url", "Please enter an image URL");
        } else if Url::parse(self.img_url.trim()).is_err() {
            errors.push("img_url", "Please enter a valid URL");
        }
        errors.into_result()
    }
}

/// Registration form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("name", &self.name, "Please enter your name");
        validate_email(&mut errors, &self.email);
        validate_password(&mut errors, &self.password);
        errors.into_result()
    }
}

/// Login form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        validate_email(&mut errors, &self.email);
        validate_password(&mut errors, &self.password);
        errors.into_result()
    }
}

/// Comment submission on a post page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.require("text", &self.text, "Please enter a comment");
        errors.into_result()
    }
}

fn validate_email(errors: &mut FormErrors, email: &str) {
    let email = email.trim();
    if email.is_empty() {
        errors.push("email", "Please enter your email address");
        return;
    }
    // local@domain with a dot in the domain part, same shape the registration
    // page promises.
    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    };
    if !well_formed {
        errors.push("email", "Please enter a valid email address");
    }
}

fn validate_password(errors: &mut FormErrors, password: &str) {
    if password.is_empty() {
        errors.push("password", "Please enter a password");
    } else if password.len() < 6 || password.len() > 35 {
        errors.push("password", "Password must be between 6 and 35 characters");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_form_requires_every_field() {
        let errors = PostForm::default().validate().unwrap_err();
        for field in ["title", "subtitle", "img_url", "body"] {
            assert!(errors.message_for(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn post_form_rejects_malformed_image_url() {
        let form = PostForm {
            title: "Hello".into(),
            subtitle: "World".into(),
            img_url: "not a url".into(),
            body: "text".into(),
        };
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.0.len(), 1);
        assert!(errors.message_for("img_url").is_some());
    }

    #[test]
    fn post_form_accepts_valid_submission() {
        let form = PostForm {
            title: "Hello".into(),
            subtitle: "World".into(),
            img_url: "https://x.com/a.png".into(),
            body: "text".into(),
        };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn register_form_checks_email_shape() {
        let form = RegisterForm {
            name: "Ann".into(),
            email: "ann-at-example.com".into(),
            password: "secret1".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.message_for("email").is_some());
    }

    #[test]
    fn register_form_enforces_password_length() {
        let form = RegisterForm {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            password: "short".into(),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.message_for("password").is_some());

        let ok = RegisterForm {
            password: "long enough".into(),
            ..form
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn comment_form_requires_text() {
        assert!(CommentForm::default().validate().is_err());
        let form = CommentForm {
            text: "nice post".into(),
        };
        assert!(form.validate().is_ok());
    }
}
