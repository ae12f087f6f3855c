//! FolioQA - Portfolio Q&A chat service library
//!
//! This library provides the core functionality for the FolioQA service:
//! the HTTP chat endpoint, the bounded in-memory session store, response
//! mode resolution, prompt assembly, and the Gemini provider client.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `server`: axum router, shared state, and request handlers
//! - `session`: bounded in-memory conversation-history store
//! - `response_mode`: closed mode enumeration and resolution/inference
//! - `prompts`: mode instruction preambles and prompt assembly
//! - `providers`: generation-provider abstraction and Gemini client
//! - `stats`: in-memory interaction statistics
//! - `config`: configuration management and validation
//! - `error`: error types and result aliases
//! - `cli`: command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use folioqa::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml")?;
//!     config.validate()?;
//!     folioqa::server::run(config).await
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompts;
pub mod providers;
pub mod response_mode;
pub mod server;
pub mod session;
pub mod stats;

// Re-export commonly used types
pub use config::Config;
pub use error::{FolioError, Result};
pub use response_mode::ResponseMode;
pub use session::{Exchange, SessionStore};
