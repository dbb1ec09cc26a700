//! Llama Stack client abstraction.
//!
//! Provides the capability surface the pre-screening workflow consumes from
//! a remote stack: model catalog, vector DB registration, corpus ingestion,
//! and the agent / session / turn lifecycle.

mod client;

pub use client::LlamaStackClient;

use crate::models::RegulatoryDocument;
use crate::Result;
use serde::Serialize;
use std::time::Duration;

/// Trait for remote agent stacks.
///
/// All calls are synchronous and block until the stack responds. The
/// production implementation is [`LlamaStackClient`]; tests substitute
/// in-memory fakes.
pub trait AgentStack: Send + Sync {
    /// The stack name.
    fn name(&self) -> &'static str;

    /// Lists the models available on the stack.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be fetched.
    fn list_models(&self) -> Result<Vec<ModelInfo>>;

    /// Registers a vector DB bound to an embedding model.
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails.
    fn register_vector_db(&self, vector_db_id: &str, embedding_model: &str) -> Result<()>;

    /// Ingests documents into a vector DB in a single batch.
    ///
    /// The stack fetches each document's content, chunks it to
    /// `chunk_size_in_tokens`, and embeds the chunks.
    ///
    /// # Errors
    ///
    /// Returns an error if ingestion fails; no per-document recovery is
    /// attempted.
    fn insert_documents(
        &self,
        vector_db_id: &str,
        documents: &[RegulatoryDocument],
        chunk_size_in_tokens: u32,
    ) -> Result<()>;

    /// Creates an agent and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if agent creation fails.
    fn create_agent(&self, definition: &AgentDefinition) -> Result<String>;

    /// Creates a conversation session under an agent and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if session creation fails.
    fn create_session(&self, agent_id: &str, session_name: &str) -> Result<String>;

    /// Submits a non-streaming turn and returns the output message text.
    ///
    /// # Errors
    ///
    /// Returns an error if the turn fails.
    fn create_turn(
        &self,
        agent_id: &str,
        session_id: &str,
        messages: &[TurnMessage],
    ) -> Result<String>;
}

/// A model catalog entry.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    /// Model identifier, e.g. `meta-llama/Llama-4-Scout-17B-16E-Instruct`.
    pub identifier: String,
    /// Model type tag, e.g. `llm` or `embedding`.
    pub model_type: String,
}

impl ModelInfo {
    /// Returns whether this is an embedding model.
    #[must_use]
    pub fn is_embedding(&self) -> bool {
        self.model_type == "embedding"
    }
}

/// Everything needed to create an agent on the stack.
#[derive(Debug, Clone, Serialize)]
pub struct AgentDefinition {
    /// Inference model backing the agent.
    pub model: String,
    /// System instructions.
    pub instructions: String,
    /// Tool groups available to the agent.
    pub toolgroups: Vec<ToolGroup>,
}

/// A tool group granted to an agent.
#[derive(Debug, Clone, Serialize)]
pub struct ToolGroup {
    /// Tool group name, e.g. `builtin::rag/knowledge_search`.
    pub name: String,
    /// Tool group arguments.
    pub args: ToolGroupArgs,
}

/// Arguments scoping a tool group.
#[derive(Debug, Clone, Serialize)]
pub struct ToolGroupArgs {
    /// Vector DBs the knowledge search tool may query.
    pub vector_db_ids: Vec<String>,
}

impl ToolGroup {
    /// Builds the knowledge-search tool group scoped to one vector DB.
    #[must_use]
    pub fn knowledge_search(vector_db_id: impl Into<String>) -> Self {
        Self {
            name: "builtin::rag/knowledge_search".to_string(),
            args: ToolGroupArgs {
                vector_db_ids: vec![vector_db_id.into()],
            },
        }
    }
}

/// One message within a turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnMessage {
    /// Message role.
    pub role: String,
    /// Message content.
    pub content: String,
}

impl TurnMessage {
    /// Builds a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// HTTP client configuration for stack requests.
#[derive(Debug, Clone, Copy)]
pub struct StackHttpConfig {
    /// Request timeout in milliseconds (0 to disable).
    ///
    /// RAG turns block while the stack retrieves and generates, so the
    /// default is generous.
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds (0 to disable).
    pub connect_timeout_ms: u64,
}

impl Default for StackHttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 120_000,
            connect_timeout_ms: 3_000,
        }
    }
}

impl StackHttpConfig {
    /// Loads HTTP configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Loads HTTP configuration from config file settings.
    #[must_use]
    pub fn from_config(config: &crate::config::HttpConfig) -> Self {
        let mut settings = Self::default();
        if let Some(timeout_ms) = config.timeout_ms {
            settings.timeout_ms = timeout_ms;
        }
        if let Some(connect_timeout_ms) = config.connect_timeout_ms {
            settings.connect_timeout_ms = connect_timeout_ms;
        }
        settings.with_env_overrides()
    }

    /// Applies environment variable overrides.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("PRESCREEN_HTTP_TIMEOUT_MS") {
            if let Ok(timeout_ms) = v.parse::<u64>() {
                self.timeout_ms = timeout_ms;
            }
        }
        if let Ok(v) = std::env::var("PRESCREEN_HTTP_CONNECT_TIMEOUT_MS") {
            if let Ok(connect_timeout_ms) = v.parse::<u64>() {
                self.connect_timeout_ms = connect_timeout_ms;
            }
        }
        self
    }
}

/// Builds a blocking HTTP client for stack requests with configured timeouts.
#[must_use]
pub fn build_http_client(config: StackHttpConfig) -> reqwest::blocking::Client {
    let mut builder = reqwest::blocking::Client::builder();
    if config.timeout_ms > 0 {
        builder = builder.timeout(Duration::from_millis(config.timeout_ms));
    }
    if config.connect_timeout_ms > 0 {
        builder = builder.connect_timeout(Duration::from_millis(config.connect_timeout_ms));
    }

    builder.build().unwrap_or_else(|err| {
        tracing::warn!("Failed to build stack HTTP client: {err}");
        reqwest::blocking::Client::new()
    })
}
