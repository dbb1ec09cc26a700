//! Provisioning Integration Tests
//!
//! Tests the provisioning workflow against an in-memory stack:
//! - Step ordering and exactly-once side effects under caching
//! - Embedding-model selection and the no-embedding-model short-circuit
//! - All-or-nothing failure semantics (no cached session after a failure)
//! - Agent and ingestion parameters as sent to the stack
//!
//! These tests issue no network calls.

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic, dead_code)]

use prescreen::config::PrescreenConfig;
use prescreen::models::RegulatoryDocument;
use prescreen::services::prompt::AGENT_INSTRUCTIONS;
use prescreen::stack::{AgentDefinition, AgentStack, ModelInfo, TurnMessage};
use prescreen::{Error, ProvisionService};
use std::sync::{Arc, Mutex};

// ============================================================================
// Mock stack
// ============================================================================

/// In-memory stack that records every call and can fail a scripted step.
struct MockStack {
    /// Operations in invocation order.
    calls: Mutex<Vec<&'static str>>,
    /// Model catalog returned by `list_models`.
    models: Vec<ModelInfo>,
    /// Operation that should fail, if any.
    fail_step: Mutex<Option<&'static str>>,
    /// Vector DB registration arguments.
    registered: Mutex<Option<(String, String)>>,
    /// Ingestion arguments.
    ingested: Mutex<Option<(String, Vec<String>, u32)>>,
    /// Agent definition passed to `create_agent`.
    agent_definition: Mutex<Option<AgentDefinition>>,
    /// Session name passed to `create_session`.
    session_name: Mutex<Option<String>>,
}

impl MockStack {
    fn new(models: Vec<ModelInfo>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            models,
            fail_step: Mutex::new(None),
            registered: Mutex::new(None),
            ingested: Mutex::new(None),
            agent_definition: Mutex::new(None),
            session_name: Mutex::new(None),
        }
    }

    fn with_catalog() -> Self {
        Self::new(vec![
            ModelInfo {
                identifier: "meta-llama/Llama-4-Scout-17B-16E-Instruct".to_string(),
                model_type: "llm".to_string(),
            },
            ModelInfo {
                identifier: "all-MiniLM-L6-v2".to_string(),
                model_type: "embedding".to_string(),
            },
        ])
    }

    fn fail_on(self, step: &'static str) -> Self {
        *self.fail_step.lock().unwrap() = Some(step);
        self
    }

    fn clear_failure(&self) {
        *self.fail_step.lock().unwrap() = None;
    }

    fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|&&c| c == operation)
            .count()
    }

    fn record(&self, operation: &'static str) -> prescreen::Result<()> {
        self.calls.lock().unwrap().push(operation);
        if *self.fail_step.lock().unwrap() == Some(operation) {
            return Err(Error::OperationFailed {
                operation: operation.to_string(),
                cause: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

impl AgentStack for MockStack {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn list_models(&self) -> prescreen::Result<Vec<ModelInfo>> {
        self.record("list_models")?;
        Ok(self.models.clone())
    }

    fn register_vector_db(&self, vector_db_id: &str, embedding_model: &str) -> prescreen::Result<()> {
        self.record("register_vector_db")?;
        *self.registered.lock().unwrap() =
            Some((vector_db_id.to_string(), embedding_model.to_string()));
        Ok(())
    }

    fn insert_documents(
        &self,
        vector_db_id: &str,
        documents: &[RegulatoryDocument],
        chunk_size_in_tokens: u32,
    ) -> prescreen::Result<()> {
        self.record("insert_documents")?;
        let ids = documents.iter().map(|d| d.document_id.clone()).collect();
        *self.ingested.lock().unwrap() =
            Some((vector_db_id.to_string(), ids, chunk_size_in_tokens));
        Ok(())
    }

    fn create_agent(&self, definition: &AgentDefinition) -> prescreen::Result<String> {
        self.record("create_agent")?;
        *self.agent_definition.lock().unwrap() = Some(definition.clone());
        Ok("agent-1".to_string())
    }

    fn create_session(&self, _agent_id: &str, session_name: &str) -> prescreen::Result<String> {
        self.record("create_session")?;
        *self.session_name.lock().unwrap() = Some(session_name.to_string());
        Ok("session-1".to_string())
    }

    fn create_turn(
        &self,
        _agent_id: &str,
        _session_id: &str,
        _messages: &[TurnMessage],
    ) -> prescreen::Result<String> {
        self.record("create_turn")?;
        Ok("scorecard".to_string())
    }
}

// ============================================================================
// Happy path and idempotence
// ============================================================================

mod provisioning {
    use super::*;

    #[test]
    fn test_provision_runs_steps_in_order() {
        let stack = Arc::new(MockStack::with_catalog());
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        let session = provisioner.provision().expect("provisioning should succeed");

        assert!(session.is_ready());
        assert_eq!(session.agent_id, "agent-1");
        assert_eq!(session.session_id, "session-1");
        assert_eq!(
            *stack.calls.lock().unwrap(),
            vec![
                "list_models",
                "register_vector_db",
                "insert_documents",
                "create_agent",
                "create_session",
            ]
        );
    }

    #[test]
    fn test_provision_twice_executes_side_effects_once() {
        let stack = Arc::new(MockStack::with_catalog());
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        let first = provisioner.provision().unwrap();
        let second = provisioner.provision().unwrap();

        assert_eq!(first.session_id, second.session_id);
        assert_eq!(first.vector_db_id, second.vector_db_id);
        for operation in [
            "list_models",
            "register_vector_db",
            "insert_documents",
            "create_agent",
            "create_session",
        ] {
            assert_eq!(stack.count(operation), 1, "{operation} ran more than once");
        }
    }

    #[test]
    fn test_provision_selects_embedding_model() {
        let stack = Arc::new(MockStack::with_catalog());
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        let session = provisioner.provision().unwrap();

        let (registered_id, embedding_model) = stack.registered.lock().unwrap().clone().unwrap();
        assert_eq!(registered_id, session.vector_db_id);
        assert_eq!(embedding_model, "all-MiniLM-L6-v2");
        assert!(session.vector_db_id.starts_with('v'));
        assert!(session.vector_db_id.len() > 1);
    }

    #[test]
    fn test_provision_ingests_configured_corpus() {
        let stack = Arc::new(MockStack::with_catalog());
        let config = PrescreenConfig::default();
        let mut provisioner = ProvisionService::new(Arc::clone(&stack), config.clone());

        let session = provisioner.provision().unwrap();

        let (vector_db_id, document_ids, chunk_size) =
            stack.ingested.lock().unwrap().clone().unwrap();
        assert_eq!(vector_db_id, session.vector_db_id);
        assert_eq!(document_ids, vec!["permit-doc-0", "permit-doc-1"]);
        assert_eq!(chunk_size, config.chunk_size_in_tokens);
    }

    #[test]
    fn test_provision_configures_agent_with_rag_tool() {
        let stack = Arc::new(MockStack::with_catalog());
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        let session = provisioner.provision().unwrap();

        let definition = stack.agent_definition.lock().unwrap().clone().unwrap();
        assert_eq!(definition.model, "meta-llama/Llama-4-Scout-17B-16E-Instruct");
        assert_eq!(definition.instructions, AGENT_INSTRUCTIONS);
        assert_eq!(definition.toolgroups.len(), 1);
        assert_eq!(definition.toolgroups[0].name, "builtin::rag/knowledge_search");
        assert_eq!(
            definition.toolgroups[0].args.vector_db_ids,
            vec![session.vector_db_id.clone()]
        );

        let session_name = stack.session_name.lock().unwrap().clone().unwrap();
        assert!(session_name.starts_with("s-"));
    }
}

// ============================================================================
// Failure semantics
// ============================================================================

mod failures {
    use super::*;

    #[test]
    fn test_no_embedding_model_short_circuits() {
        let stack = Arc::new(MockStack::new(vec![ModelInfo {
            identifier: "meta-llama/Llama-4-Scout-17B-16E-Instruct".to_string(),
            model_type: "llm".to_string(),
        }]));
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        let result = provisioner.provision();

        assert!(matches!(result, Err(Error::NoEmbeddingModel)));
        // Catalog lookup only; no vector DB is registered.
        assert_eq!(*stack.calls.lock().unwrap(), vec!["list_models"]);
        assert!(!provisioner.is_ready());
    }

    #[test]
    fn test_ingestion_failure_leaves_no_cached_session() {
        let stack = Arc::new(MockStack::with_catalog().fail_on("insert_documents"));
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        let result = provisioner.provision();

        assert!(matches!(
            result,
            Err(Error::Init { step: "insert_documents", .. })
        ));
        assert!(!provisioner.is_ready());
        assert!(provisioner.session().is_none());
        // Later steps never ran.
        assert_eq!(stack.count("create_agent"), 0);
        assert_eq!(stack.count("create_session"), 0);
    }

    #[test]
    fn test_retry_after_failure_reruns_all_steps() {
        let stack = Arc::new(MockStack::with_catalog().fail_on("insert_documents"));
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        assert!(provisioner.provision().is_err());
        stack.clear_failure();
        let session = provisioner.provision().expect("retry should succeed");

        assert!(session.is_ready());
        // Both attempts hit the catalog and registration; ingestion succeeded
        // on the second pass.
        assert_eq!(stack.count("list_models"), 2);
        assert_eq!(stack.count("register_vector_db"), 2);
        assert_eq!(stack.count("insert_documents"), 2);
        assert_eq!(stack.count("create_agent"), 1);
    }

    #[test]
    fn test_registration_failure_carries_cause() {
        let stack = Arc::new(MockStack::with_catalog().fail_on("register_vector_db"));
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        let err = provisioner.provision().unwrap_err();

        match err {
            Error::Init { step, cause } => {
                assert_eq!(step, "register_vector_db");
                assert!(cause.contains("simulated failure"), "cause was: {cause}");
            },
            other => panic!("expected Init error, got: {other}"),
        }
    }

    #[test]
    fn test_catalog_failure_is_an_init_error() {
        let stack = Arc::new(MockStack::with_catalog().fail_on("list_models"));
        let mut provisioner =
            ProvisionService::new(Arc::clone(&stack), PrescreenConfig::default());

        let result = provisioner.provision();

        assert!(matches!(result, Err(Error::Init { step: "list_models", .. })));
    }
}

// ============================================================================
// Fresh identifiers per run
// ============================================================================

mod identifiers {
    use super::*;

    #[test]
    fn test_independent_runs_get_distinct_vector_db_ids() {
        let stack_a = Arc::new(MockStack::with_catalog());
        let stack_b = Arc::new(MockStack::with_catalog());
        let session_a = ProvisionService::new(Arc::clone(&stack_a), PrescreenConfig::default())
            .provision()
            .unwrap();
        let session_b = ProvisionService::new(Arc::clone(&stack_b), PrescreenConfig::default())
            .provision()
            .unwrap();

        assert_ne!(session_a.vector_db_id, session_b.vector_db_id);
    }
}
