use reqwest::Client;
use std::time::Duration;
use tracing::{info, warn};

use super::form::{ContactError, ContactForm};
use crate::constants::{CONTACT_FAILURE_MESSAGE, CONTACT_SUCCESS_MESSAGE};

/// What the visitor is told after submitting the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    Sent,
    Failed,
}

impl ContactOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ContactOutcome::Sent => CONTACT_SUCCESS_MESSAGE,
            ContactOutcome::Failed => CONTACT_FAILURE_MESSAGE,
        }
    }
}

/// Posts contact forms to a third-party form relay
pub struct ContactClient {
    client: Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: endpoint.into(),
        })
    }

    /// Validate and post the form
    pub async fn send(&self, form: &ContactForm) -> Result<(), ContactError> {
        let form = form.validated()?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&form)
            .send()
            .await
            .map_err(|e| ContactError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ContactError::Status(status.as_u16()));
        }
        Ok(())
    }

    /// Post the form, reducing any failure to [`ContactOutcome::Failed`]
    pub async fn submit(&self, form: &ContactForm) -> ContactOutcome {
        match self.send(form).await {
            Ok(()) => {
                info!("📨 Contact form delivered");
                ContactOutcome::Sent
            }
            Err(e) => {
                warn!("❌ Contact form failed: {}", e);
                ContactOutcome::Failed
            }
        }
    }
}
