//! # Prescreen
//!
//! AI-assisted compliance pre-screening for mobile food vendor permit
//! applications.
//!
//! Prescreen drives a remote Llama Stack deployment: it provisions a
//! per-run vector DB populated from the city's regulatory PDFs, creates a
//! retrieval-backed permitting agent, and submits each application as a
//! conversational turn. The agent's markdown scorecard is returned verbatim;
//! all retrieval, embedding, and generation happen on the remote stack.
//!
//! ## Workflow
//!
//! - Provision once per process: register a vector DB, ingest the regulatory
//!   corpus, create the agent and a session (`ProvisionService`).
//! - Review per application: render the submission, submit one turn, return
//!   the scorecard (`ReviewService`).
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use prescreen::{PrescreenConfig, ProvisionService, ReviewService};
//! use prescreen::stack::LlamaStackClient;
//!
//! let config = PrescreenConfig::load_default();
//! let stack = Arc::new(LlamaStackClient::from_config(&config));
//! let mut provisioner = ProvisionService::new(Arc::clone(&stack), config.clone());
//! let session = provisioner.provision()?;
//! let scorecard = ReviewService::new(stack).review(&session, &submission)?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
// multiple_crate_versions is inherently crate-level (detects duplicate transitive dependencies).
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod models;
pub mod observability;
pub mod services;
pub mod stack;

// Re-exports for convenience
pub use config::{CorpusSource, PrescreenConfig};
pub use models::{ApplicationSubmission, RegulatoryDocument, ReviewSession, Scorecard};
pub use services::{ProvisionService, ReviewService};
pub use stack::{AgentStack, LlamaStackClient, StackHttpConfig};

/// Error type for prescreen operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Missing required submission fields, malformed config values |
/// | `OperationFailed` | Remote stack calls fail at the transport layer, local I/O fails |
/// | `NoEmbeddingModel` | The stack's model catalog has no `embedding` entry |
/// | `Init` | A provisioning step failed; no session is cached |
/// | `NotReady` | A review was attempted before successful provisioning |
/// | `Review` | Turn submission failed or the agent returned an empty response |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - A mandatory submission field (business name, commissary, menu) is empty
    /// - A configuration file contains out-of-range or unparseable values
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - An HTTP call to the stack fails (connect, timeout, non-2xx status)
    /// - A stack response cannot be deserialized
    /// - Writing a scorecard to disk fails
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The stack exposes no embedding model.
    ///
    /// Raised during provisioning when the model catalog contains no entry
    /// with `model_type == "embedding"`. No vector DB is registered in this
    /// case.
    #[error("no embedding model is available on the stack")]
    NoEmbeddingModel,

    /// Provisioning failed.
    ///
    /// Raised when any provisioning step fails: vector DB registration,
    /// corpus ingestion, agent creation, or session creation. Carries the
    /// failed step and the underlying cause; no partial session is cached.
    #[error("provisioning failed at {step}: {cause}")]
    Init {
        /// The provisioning step that failed.
        step: &'static str,
        /// The underlying cause.
        cause: String,
    },

    /// The review session is not provisioned.
    ///
    /// Raised when a review is attempted against a session that never
    /// completed provisioning. No remote call is issued.
    #[error("review session is not ready; provision the agent first")]
    NotReady,

    /// Scorecard generation failed.
    ///
    /// Raised when:
    /// - The turn submission fails at the transport or remote side
    /// - The agent returns an empty or blank response
    #[error("scorecard generation failed: {cause}")]
    Review {
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for prescreen operations.
pub type Result<T> = std::result::Result<T, Error>;
