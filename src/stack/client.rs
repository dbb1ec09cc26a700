//! Blocking HTTP client for the Llama Stack REST API.

use super::{
    AgentDefinition, AgentStack, ModelInfo, StackHttpConfig, TurnMessage, build_http_client,
};
use crate::models::RegulatoryDocument;
use crate::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Client for a Llama Stack deployment.
pub struct LlamaStackClient {
    /// API endpoint.
    endpoint: String,
    /// HTTP client.
    client: reqwest::blocking::Client,
}

impl LlamaStackClient {
    /// Default API endpoint.
    pub const DEFAULT_ENDPOINT: &'static str = crate::config::DEFAULT_ENDPOINT;

    /// Creates a new client from environment defaults.
    #[must_use]
    pub fn new() -> Self {
        let endpoint = std::env::var("PRESCREEN_ENDPOINT")
            .unwrap_or_else(|_| Self::DEFAULT_ENDPOINT.to_string());

        Self {
            endpoint,
            client: build_http_client(StackHttpConfig::from_env()),
        }
    }

    /// Creates a client from loaded configuration.
    #[must_use]
    pub fn from_config(config: &crate::config::PrescreenConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            client: build_http_client(StackHttpConfig::from_config(&config.http)),
        }
    }

    /// Sets the API endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets HTTP client timeouts for stack requests.
    #[must_use]
    pub fn with_http_config(mut self, config: StackHttpConfig) -> Self {
        self.client = build_http_client(config);
        self
    }

    /// Returns the configured endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Checks if the stack is reachable.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.client
            .get(format!("{}/v1/health", self.endpoint))
            .send()
            .map(|r| r.status().is_success())
            .unwrap_or(false)
    }

    /// Issues a GET request and checks the response status.
    fn get(&self, operation: &'static str, path: &str) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .get(format!("{}{path}", self.endpoint))
            .send()
            .map_err(|e| transport_error(operation, &e))?;
        check_status(operation, response)
    }

    /// Issues a POST request with a JSON body and checks the response status.
    fn post<B: serde::Serialize>(
        &self,
        operation: &'static str,
        path: &str,
        body: &B,
    ) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .post(format!("{}{path}", self.endpoint))
            .json(body)
            .send()
            .map_err(|e| transport_error(operation, &e))?;
        check_status(operation, response)
    }
}

impl Default for LlamaStackClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentStack for LlamaStackClient {
    fn name(&self) -> &'static str {
        "llama-stack"
    }

    fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self.get("list_models", "/v1/models")?;
        let response: ModelListResponse = parse_json("list_models", response)?;

        Ok(response
            .data
            .into_iter()
            .map(|m| ModelInfo {
                identifier: m.identifier,
                model_type: m.model_type,
            })
            .collect())
    }

    fn register_vector_db(&self, vector_db_id: &str, embedding_model: &str) -> Result<()> {
        let request = RegisterVectorDbRequest {
            vector_db_id,
            embedding_model,
        };

        self.post("register_vector_db", "/v1/vector-dbs", &request)?;
        Ok(())
    }

    fn insert_documents(
        &self,
        vector_db_id: &str,
        documents: &[RegulatoryDocument],
        chunk_size_in_tokens: u32,
    ) -> Result<()> {
        let request = InsertDocumentsRequest {
            documents,
            vector_db_id,
            chunk_size_in_tokens,
        };

        self.post(
            "insert_documents",
            "/v1/tool-runtime/rag-tool/insert",
            &request,
        )?;
        Ok(())
    }

    fn create_agent(&self, definition: &AgentDefinition) -> Result<String> {
        let request = CreateAgentRequest {
            agent_config: definition,
        };

        let response = self.post("create_agent", "/v1/agents", &request)?;
        let response: CreateAgentResponse = parse_json("create_agent", response)?;
        Ok(response.agent_id)
    }

    fn create_session(&self, agent_id: &str, session_name: &str) -> Result<String> {
        let request = CreateSessionRequest { session_name };

        let response = self.post(
            "create_session",
            &format!("/v1/agents/{agent_id}/session"),
            &request,
        )?;
        let response: CreateSessionResponse = parse_json("create_session", response)?;
        Ok(response.session_id)
    }

    fn create_turn(
        &self,
        agent_id: &str,
        session_id: &str,
        messages: &[TurnMessage],
    ) -> Result<String> {
        let request = CreateTurnRequest {
            messages,
            stream: false,
        };

        let response = self.post(
            "create_turn",
            &format!("/v1/agents/{agent_id}/session/{session_id}/turn"),
            &request,
        )?;
        let response: TurnResponse = parse_json("create_turn", response)?;
        Ok(response.output_message.content.into_text())
    }
}

/// Converts a transport-level failure into a typed error.
fn transport_error(operation: &'static str, e: &reqwest::Error) -> Error {
    let error_kind = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_request() {
        "request"
    } else {
        "unknown"
    };
    tracing::error!(
        stack = "llama-stack",
        operation = operation,
        error = %e,
        error_kind = error_kind,
        is_timeout = e.is_timeout(),
        is_connect = e.is_connect(),
        "Stack request failed"
    );
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: format!("{error_kind} error: {e}"),
    }
}

/// Rejects non-success responses, logging status and body.
fn check_status(
    operation: &'static str,
    response: reqwest::blocking::Response,
) -> Result<reqwest::blocking::Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().unwrap_or_default();
    tracing::error!(
        stack = "llama-stack",
        operation = operation,
        status = %status,
        body = %body,
        "Stack API returned error status"
    );
    Err(Error::OperationFailed {
        operation: operation.to_string(),
        cause: format!("API returned status: {status} - {body}"),
    })
}

/// Deserializes a JSON response body.
fn parse_json<T: DeserializeOwned>(
    operation: &'static str,
    response: reqwest::blocking::Response,
) -> Result<T> {
    response.json().map_err(|e| {
        tracing::error!(
            stack = "llama-stack",
            operation = operation,
            error = %e,
            "Failed to parse stack response"
        );
        Error::OperationFailed {
            operation: operation.to_string(),
            cause: e.to_string(),
        }
    })
}

/// Response from the model catalog.
#[derive(Debug, Deserialize)]
struct ModelListResponse {
    data: Vec<ModelEntry>,
}

/// A model catalog entry on the wire.
#[derive(Debug, Deserialize)]
struct ModelEntry {
    identifier: String,
    model_type: String,
}

/// Request to register a vector DB.
#[derive(Debug, serde::Serialize)]
struct RegisterVectorDbRequest<'a> {
    vector_db_id: &'a str,
    embedding_model: &'a str,
}

/// Request to ingest documents via the RAG tool.
#[derive(Debug, serde::Serialize)]
struct InsertDocumentsRequest<'a> {
    documents: &'a [RegulatoryDocument],
    vector_db_id: &'a str,
    chunk_size_in_tokens: u32,
}

/// Request to create an agent.
#[derive(Debug, serde::Serialize)]
struct CreateAgentRequest<'a> {
    agent_config: &'a AgentDefinition,
}

/// Response from agent creation.
#[derive(Debug, Deserialize)]
struct CreateAgentResponse {
    agent_id: String,
}

/// Request to open a session.
#[derive(Debug, serde::Serialize)]
struct CreateSessionRequest<'a> {
    session_name: &'a str,
}

/// Response from session creation.
#[derive(Debug, Deserialize)]
struct CreateSessionResponse {
    session_id: String,
}

/// Request to submit a turn.
#[derive(Debug, serde::Serialize)]
struct CreateTurnRequest<'a> {
    messages: &'a [TurnMessage],
    stream: bool,
}

/// Response from turn submission.
#[derive(Debug, Deserialize)]
struct TurnResponse {
    output_message: OutputMessage,
}

/// The agent's output message.
#[derive(Debug, Deserialize)]
struct OutputMessage {
    content: MessageContent,
}

/// Output content, either a plain string or a list of text items.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Items(Vec<ContentItem>),
}

/// One item of interleaved content.
#[derive(Debug, Deserialize)]
struct ContentItem {
    #[serde(default)]
    text: String,
}

impl MessageContent {
    /// Flattens the content into plain text.
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Items(items) => items
                .into_iter()
                .map(|item| item.text)
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}
