//! Contact form: the one write path from the public site.
//!
//! Validation happens entirely before the store write — empty trimmed
//! fields and malformed addresses never reach the database. A store-level
//! failure is wrapped in a generic "try again later" error; the sender's
//! address being unknown means there is nothing smarter to do.

use thiserror::Error;

use crate::model::Contact;
use crate::store::{ContentStore, StoreError};
use crate::util::is_valid_email;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactFormError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),

    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Error)]
pub enum ContactError {
    #[error(transparent)]
    Invalid(#[from] ContactFormError),

    #[error("There was an error submitting your message. Please try again later.")]
    Submit(#[source] StoreError),
}

// ============================================================================
// Contact Form
// ============================================================================

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Check required fields and the email shape without touching the store.
    pub fn validate(&self) -> Result<(), ContactFormError> {
        if self.name.trim().is_empty() {
            return Err(ContactFormError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ContactFormError::MissingField("email"));
        }
        if self.message.trim().is_empty() {
            return Err(ContactFormError::MissingField("message"));
        }
        if !is_valid_email(&self.email) {
            return Err(ContactFormError::InvalidEmail);
        }
        Ok(())
    }

    /// Validate and append the message to the `contacts` collection.
    ///
    /// Returns the store-assigned id of the new message.
    pub async fn submit(&self, store: &ContentStore) -> Result<String, ContactError> {
        self.validate()?;

        let message = Contact::new(self.name.trim(), self.email.trim(), self.message.trim());
        store.add(&message).await.map_err(|e| {
            tracing::error!(error = %e, "contact message submission failed");
            ContactError::Submit(e)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let form = ContactForm::new("   ", "a@b.co", "hello");
        assert_eq!(form.validate(), Err(ContactFormError::MissingField("name")));
    }

    #[test]
    fn test_empty_email_rejected() {
        let form = ContactForm::new("Ada", "", "hello");
        assert_eq!(
            form.validate(),
            Err(ContactFormError::MissingField("email"))
        );
    }

    #[test]
    fn test_empty_message_rejected() {
        let form = ContactForm::new("Ada", "a@b.co", "  \n ");
        assert_eq!(
            form.validate(),
            Err(ContactFormError::MissingField("message"))
        );
    }

    #[test]
    fn test_malformed_email_rejected() {
        let form = ContactForm::new("Ada", "not-an-email", "hello");
        assert_eq!(form.validate(), Err(ContactFormError::InvalidEmail));
    }

    #[test]
    fn test_valid_form_passes() {
        let form = ContactForm::new("Ada", "a@b.co", "hello");
        assert_eq!(form.validate(), Ok(()));
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_store() {
        use crate::store::QueryOptions;

        let store = ContentStore::open(":memory:", "test-owner").await.unwrap();
        let form = ContactForm::new("Ada", "not-an-email", "hello");

        let err = form.submit(&store).await.unwrap_err();
        assert!(matches!(
            err,
            ContactError::Invalid(ContactFormError::InvalidEmail)
        ));

        let stored: Vec<crate::store::Document<Contact>> =
            store.list(&QueryOptions::default()).await.unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_submit_stores_trimmed_fields_with_defaults() {
        let store = ContentStore::open(":memory:", "test-owner").await.unwrap();
        let form = ContactForm::new("  Ada  ", " ada@example.com ", " Hi there ");

        let id = form.submit(&store).await.unwrap();
        let doc = store.get::<Contact>(&id).await.unwrap().unwrap();
        assert_eq!(doc.data.name, "Ada");
        assert_eq!(doc.data.email, "ada@example.com");
        assert_eq!(doc.data.message, "Hi there");
        assert!(!doc.data.responded);
        assert!(doc.data.created_at.is_some());
        assert!(doc.data.updated_at.is_some());
    }
}
