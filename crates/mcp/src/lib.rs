//! MCP (Model Context Protocol) implementation for the Kaggle tool server.
//!
//! This crate implements the MCP protocol over JSON-RPC 2.0, exposing the
//! Kaggle tool catalogue to LLM agents.
//!
//! # Architecture
//!
//! - **types**: JSON-RPC 2.0 and MCP-specific protocol types
//! - **transport**: Pluggable transport layer (stdio, channels)
//! - **server**: MCP server wrapping a `ToolRegistry`
//! - **error**: Unified error types
//!
//! # Usage
//!
//! ```no_run
//! use kaggle_mcp::server::McpServer;
//! use kaggle_mcp::transport::StdioTransport;
//! use kaggle_tools::ToolRegistry;
//!
//! # async fn example() {
//! let registry = ToolRegistry::new();
//! let mut server = McpServer::new(registry);
//! let mut transport = StdioTransport::new();
//! server.run(&mut transport).await.unwrap();
//! # }
//! ```

pub mod types;
pub mod transport;
pub mod server;
pub mod error;

pub use types::*;
pub use transport::{McpTransport, StdioTransport, ChannelTransport};
pub use server::McpServer;
pub use error::McpError;
