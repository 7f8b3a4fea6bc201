//! Workspace-level integration tests for MCPollinations.
//!
//! These tests verify:
//! - The server starts and stops on each transport
//! - Tool registration and schema generation
//! - Property-based tests for tool schema validity, input validation, and output format

pub mod input_validation;
pub mod output_format;
pub mod server_startup;
pub mod tool_schema;
