//! Permit application submissions.

use crate::{Error, Result};

/// A permit application as submitted by the applicant.
///
/// Business name, commissary, and menu are mandatory; additional information
/// is optional and rendered as an empty field when absent.
#[derive(Debug, Clone, Default)]
pub struct ApplicationSubmission {
    /// Official name of the food truck business.
    pub business_name: String,
    /// Name and address of the commissary kitchen.
    pub commissary: String,
    /// Menu items the applicant plans to serve.
    pub menu: String,
    /// Additional licenses, certifications, or special requirements.
    pub additional_info: Option<String>,
}

impl ApplicationSubmission {
    /// Validates that all mandatory fields are non-empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` naming the first missing field.
    pub fn validate(&self) -> Result<()> {
        if self.business_name.trim().is_empty() {
            return Err(Error::InvalidInput("business name is required".to_string()));
        }
        if self.commissary.trim().is_empty() {
            return Err(Error::InvalidInput("commissary is required".to_string()));
        }
        if self.menu.trim().is_empty() {
            return Err(Error::InvalidInput("menu is required".to_string()));
        }
        Ok(())
    }

    /// Renders the submission as the plain-text form block reviewed by the
    /// agent.
    ///
    /// Field order is fixed: business name, commissary, menu, additional
    /// information. The last line is present but empty when no additional
    /// information was supplied.
    #[must_use]
    pub fn form_text(&self) -> String {
        let additional = self.additional_info.as_deref().unwrap_or_default();
        format!(
            "Business Name: {}\nCommissary: {}\nMenu: {}\nAdditional Information: {}",
            self.business_name, self.commissary, self.menu, additional
        )
        .trim()
        .to_string()
    }
}
