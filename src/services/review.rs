//! Compliance review invocation.

use crate::models::{ApplicationSubmission, ReviewSession, Scorecard};
use crate::services::prompt::build_review_prompt;
use crate::stack::{AgentStack, TurnMessage};
use crate::{Error, Result};
use std::sync::Arc;

/// Service that submits applications for review.
pub struct ReviewService<S: AgentStack> {
    /// Stack client.
    stack: Arc<S>,
}

impl<S: AgentStack> ReviewService<S> {
    /// Creates a new review service.
    #[must_use]
    pub const fn new(stack: Arc<S>) -> Self {
        Self { stack }
    }

    /// Reviews one application and returns the agent's scorecard.
    ///
    /// Submits exactly one non-streaming turn within the provisioned session
    /// and passes the response through verbatim. The session is left intact
    /// on failure, so the caller may simply retry.
    ///
    /// # Errors
    ///
    /// Returns `Error::NotReady` (without issuing any remote call) when the
    /// session is not provisioned, or `Error::Review` when the turn fails or
    /// the agent returns an empty response.
    pub fn review(
        &self,
        session: &ReviewSession,
        submission: &ApplicationSubmission,
    ) -> Result<Scorecard> {
        if !session.is_ready() {
            return Err(Error::NotReady);
        }

        let prompt = build_review_prompt(&submission.form_text());
        let messages = [TurnMessage::user(prompt)];

        let output = self
            .stack
            .create_turn(&session.agent_id, &session.session_id, &messages)
            .map_err(|e| Error::Review {
                cause: e.to_string(),
            })?;

        if output.trim().is_empty() {
            return Err(Error::Review {
                cause: "agent returned an empty response".to_string(),
            });
        }

        tracing::info!(
            session_id = %session.session_id,
            business_name = %submission.business_name,
            scorecard_bytes = output.len(),
            "Generated compliance scorecard"
        );

        Ok(Scorecard::new(output))
    }
}
