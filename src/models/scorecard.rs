//! Compliance scorecards.

use crate::{Error, Result};
use std::path::Path;

/// The agent's compliance scorecard for one application.
///
/// Holds the response text verbatim — typically a markdown table followed by
/// a summary paragraph, but the format is a request to the agent, not a
/// guarantee. No local parsing or scoring is applied.
#[derive(Debug, Clone)]
pub struct Scorecard {
    markdown: String,
}

impl Scorecard {
    /// Wraps the agent's response text.
    #[must_use]
    pub const fn new(markdown: String) -> Self {
        Self { markdown }
    }

    /// Returns the scorecard text as received from the agent.
    #[must_use]
    pub fn as_markdown(&self) -> &str {
        &self.markdown
    }

    /// Writes the scorecard to a file.
    ///
    /// # Errors
    ///
    /// Returns `Error::OperationFailed` if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, &self.markdown).map_err(|e| Error::OperationFailed {
            operation: "write_scorecard".to_string(),
            cause: format!("{}: {e}", path.display()),
        })
    }
}
