//! Agent session provisioning.
//!
//! Runs the one-time setup against the stack: vector DB registration,
//! regulatory corpus ingestion, agent creation, and session creation. A
//! session is all-or-nothing; any failed step aborts the run and nothing is
//! cached, so a later call retries every step from scratch.

use crate::config::PrescreenConfig;
use crate::models::{RegulatoryDocument, ReviewSession};
use crate::services::prompt::AGENT_INSTRUCTIONS;
use crate::stack::{AgentDefinition, AgentStack, ToolGroup};
use crate::{Error, Result};
use std::sync::Arc;

/// Service that provisions and owns the review session.
pub struct ProvisionService<S: AgentStack> {
    /// Stack client.
    stack: Arc<S>,
    /// Configuration snapshot for this run.
    config: PrescreenConfig,
    /// Cached session from a successful run.
    session: Option<ReviewSession>,
}

impl<S: AgentStack> ProvisionService<S> {
    /// Creates a new provision service.
    #[must_use]
    pub const fn new(stack: Arc<S>, config: PrescreenConfig) -> Self {
        Self {
            stack,
            config,
            session: None,
        }
    }

    /// Returns whether a ready session is cached.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.session.as_ref().is_some_and(ReviewSession::is_ready)
    }

    /// Returns the cached session, if provisioning has succeeded.
    #[must_use]
    pub fn session(&self) -> Option<&ReviewSession> {
        self.session.as_ref()
    }

    /// Provisions the review session, reusing a prior successful run.
    ///
    /// Idempotent: once a run has succeeded, subsequent calls return the
    /// cached session without issuing any remote call.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoEmbeddingModel` when the stack's catalog has no
    /// embedding model, or `Error::Init` naming the step that failed.
    pub fn provision(&mut self) -> Result<ReviewSession> {
        if let Some(session) = &self.session {
            if session.is_ready() {
                tracing::debug!(
                    session_id = %session.session_id,
                    "Reusing provisioned review session"
                );
                return Ok(session.clone());
            }
        }

        let session = self.provision_uncached()?;
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Runs every provisioning step against the stack.
    fn provision_uncached(&self) -> Result<ReviewSession> {
        let models = self
            .stack
            .list_models()
            .map_err(|e| init_error("list_models", &e))?;

        let embedding_model = models
            .iter()
            .find(|m| m.is_embedding())
            .ok_or(Error::NoEmbeddingModel)?;
        tracing::info!(
            embedding_model = %embedding_model.identifier,
            "Selected embedding model"
        );

        let vector_db_id = format!("v{}", uuid::Uuid::new_v4().simple());
        self.stack
            .register_vector_db(&vector_db_id, &embedding_model.identifier)
            .map_err(|e| init_error("register_vector_db", &e))?;

        let documents: Vec<RegulatoryDocument> = self
            .config
            .corpus
            .iter()
            .enumerate()
            .map(|(i, source)| RegulatoryDocument::from_corpus_source(i, source))
            .collect();

        self.stack
            .insert_documents(&vector_db_id, &documents, self.config.chunk_size_in_tokens)
            .map_err(|e| init_error("insert_documents", &e))?;
        tracing::info!(
            vector_db_id = %vector_db_id,
            documents = documents.len(),
            chunk_size_in_tokens = self.config.chunk_size_in_tokens,
            "Ingested regulatory corpus"
        );

        let definition = AgentDefinition {
            model: self.config.model.clone(),
            instructions: AGENT_INSTRUCTIONS.to_string(),
            toolgroups: vec![ToolGroup::knowledge_search(&vector_db_id)],
        };
        let agent_id = self
            .stack
            .create_agent(&definition)
            .map_err(|e| init_error("create_agent", &e))?;

        let session_name = format!("s-{}", uuid::Uuid::new_v4().simple());
        let session_id = self
            .stack
            .create_session(&agent_id, &session_name)
            .map_err(|e| init_error("create_session", &e))?;

        tracing::info!(
            agent_id = %agent_id,
            session_id = %session_id,
            model = %self.config.model,
            "Provisioned review session"
        );

        Ok(ReviewSession {
            vector_db_id,
            agent_id,
            session_id,
            ready: true,
        })
    }
}

/// Wraps a step failure, preserving the underlying cause.
fn init_error(step: &'static str, cause: &Error) -> Error {
    Error::Init {
        step,
        cause: cause.to_string(),
    }
}
