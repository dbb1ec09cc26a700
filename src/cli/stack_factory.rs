//! Stack client factory functions for CLI commands.
//!
//! Provides builders for creating the stack client from configuration.

use crate::config::PrescreenConfig;
use crate::stack::{LlamaStackClient, StackHttpConfig};

/// Builds HTTP configuration from loaded config with environment overrides.
#[must_use]
pub fn build_http_config(config: &PrescreenConfig) -> StackHttpConfig {
    StackHttpConfig::from_config(&config.http)
}

/// Builds a Llama Stack client from configuration.
#[must_use]
pub fn build_stack_client(config: &PrescreenConfig) -> LlamaStackClient {
    LlamaStackClient::new()
        .with_endpoint(&config.endpoint)
        .with_http_config(build_http_config(config))
}
