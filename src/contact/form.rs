use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContactError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Could not reach form relay: {0}")]
    Transport(String),

    #[error("Form relay returned HTTP {0}")]
    Status(u16),
}

/// A message left through the contact form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Trimmed copy with every field required to be non-empty
    pub fn validated(&self) -> Result<Self, ContactError> {
        let field = |value: &str, name: &'static str| {
            let value = value.trim();
            if value.is_empty() {
                Err(ContactError::MissingField(name))
            } else {
                Ok(value.to_string())
            }
        };

        Ok(Self {
            name: field(&self.name, "name")?,
            email: field(&self.email, "email")?,
            subject: field(&self.subject, "subject")?,
            message: field(&self.message, "message")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_trims_fields() {
        let form = ContactForm::new(" Ada ", "ada@example.com", " Hello", "Workshop?\n");
        let clean = form.validated().unwrap();
        assert_eq!(clean.name, "Ada");
        assert_eq!(clean.subject, "Hello");
        assert_eq!(clean.message, "Workshop?");
    }

    #[test]
    fn test_missing_field_reported() {
        let form = ContactForm::new("Ada", "ada@example.com", "   ", "Hi");
        match form.validated() {
            Err(ContactError::MissingField(field)) => assert_eq!(field, "subject"),
            other => panic!("Expected missing subject, got {:?}", other),
        }
    }
}
