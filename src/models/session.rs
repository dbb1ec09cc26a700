//! Provisioned review session state.

/// Handle to a fully provisioned review session on the stack.
///
/// Owned by the provisioner; reviewers borrow it read-only. `ready` is set
/// only after every provisioning step has succeeded, so a session observable
/// through the provisioner cache is always complete.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    /// Vector DB holding the ingested regulatory corpus.
    pub vector_db_id: String,
    /// Agent created for this run.
    pub agent_id: String,
    /// Conversation session under the agent.
    pub session_id: String,
    /// Whether provisioning completed.
    pub ready: bool,
}

impl ReviewSession {
    /// Returns whether the session is ready for reviews.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readiness_flag() {
        let session = ReviewSession {
            vector_db_id: "v0".to_string(),
            agent_id: "agent-0".to_string(),
            session_id: "session-0".to_string(),
            ready: false,
        };
        assert!(!session.is_ready());
    }
}
