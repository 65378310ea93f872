//! Contact-form validation and the `mailto:` link it turns into.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::PageConfig;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

const NOT_SPECIFIED: &str = "Not specified";

/// A form field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Email,
    Message,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Phone => "Phone",
            Field::Email => "Valid email",
            Field::Message => "Message",
        }
    }
}

pub fn looks_like_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// One visitor's contact request, every field trimmed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inquiry {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub descriptor: String,
    pub message: String,
}

impl Inquiry {
    pub fn new(name: &str, phone: &str, email: &str, descriptor: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
            descriptor: descriptor.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Checks every rule and reports all failures together.
    pub fn validate(&self) -> Result<(), Vec<Field>> {
        let mut missing = Vec::new();
        if self.name.is_empty() {
            missing.push(Field::Name);
        }
        if self.phone.is_empty() {
            missing.push(Field::Phone);
        }
        if !looks_like_email(&self.email) {
            missing.push(Field::Email);
        }
        if self.message.is_empty() {
            missing.push(Field::Message);
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

pub fn missing_fields_notice(fields: &[Field]) -> String {
    let labels: Vec<&str> = fields.iter().map(|f| f.label()).collect();
    format!("Please add: {}", labels.join(", "))
}

/// Builds the pre-filled email for a validated inquiry.
pub struct MailDraft<'a> {
    config: &'a PageConfig,
}

impl<'a> MailDraft<'a> {
    pub fn new(config: &'a PageConfig) -> Self {
        Self { config }
    }

    pub fn subject(&self, inquiry: &Inquiry) -> String {
        format!("{}{}", self.config.subject_prefix, inquiry.name)
    }

    pub fn body(&self, inquiry: &Inquiry) -> String {
        let descriptor = if inquiry.descriptor.is_empty() {
            NOT_SPECIFIED
        } else {
            inquiry.descriptor.as_str()
        };
        format!(
            "Name: {}\nPhone: {}\nEmail: {}\n{}: {}\n\nMessage:\n{}\n\n{}",
            inquiry.name,
            inquiry.phone,
            inquiry.email,
            self.config.descriptor_label,
            descriptor,
            inquiry.message,
            self.config.signature,
        )
    }

    pub fn mailto(&self, inquiry: &Inquiry) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.config.recipient,
            urlencoding::encode(&self.subject(inquiry)),
            urlencoding::encode(&self.body(inquiry)),
        )
    }
}
