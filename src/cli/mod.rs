//! CLI command support.
//!
//! This module backs the `prescreen` binary. The binary's subcommands:
//!
//! | Command | Description |
//! |---------|-------------|
//! | `review` | Provision the agent and generate a compliance scorecard |
//! | `status` | Report stack reachability and available models |
//! | `corpus` | List the configured regulatory document sources |
//! | `completions` | Generate shell completion scripts |
//!
//! # Example Usage
//!
//! ```bash
//! # Review an application and save the scorecard
//! prescreen review \
//!     --business-name "Taco Co" \
//!     --commissary "123 Main St Kitchen" \
//!     --menu "Tacos, Burritos" \
//!     --output scorecard.md
//!
//! # Check the stack
//! prescreen status
//! ```

mod stack_factory;

pub use stack_factory::{build_http_config, build_stack_client};
