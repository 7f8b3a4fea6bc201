//! MCPollinations common library
//!
//! Configuration, error types, tracing setup and transport plumbing shared by
//! the MCPollinations server and its configuration generator.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod server;
pub mod tracing;
pub mod transport;

#[cfg(test)]
mod transport_test;

pub use config::{Config, expand_home};
pub use error::{ConfigError, Error, Result};
pub use server::{McpServerBuilder, ServerError, shutdown_channel};
pub use transport::{Transport, TransportArgs, TransportMode};
