//! Base provider trait and common types
//!
//! This module defines the GenerationProvider trait that all generation
//! backends must implement, along with the model metadata type returned by
//! model discovery.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Metadata describing an available generation model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Fully-qualified model name (e.g. "models/gemini-flash-lite-latest")
    pub name: String,
    /// Human-readable display name
    #[serde(default)]
    pub display_name: String,
    /// Short description of the model
    #[serde(default)]
    pub description: String,
    /// Maximum input tokens the model accepts
    #[serde(default)]
    pub input_token_limit: u64,
    /// Maximum output tokens the model produces
    #[serde(default)]
    pub output_token_limit: u64,
}

/// Trait for generation backends
///
/// The service treats the generation API as an opaque remote call: given a
/// fully assembled prompt it returns the generated text. Implementations
/// own their transport, authentication, and bounded retry behavior.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Provider name for logging and the service descriptor
    fn name(&self) -> &str;

    /// The model the provider is configured to use
    fn model(&self) -> String;

    /// Generate a response for a fully assembled prompt
    ///
    /// # Arguments
    ///
    /// * `prompt` - The complete prompt string
    ///
    /// # Returns
    ///
    /// The generated text
    ///
    /// # Errors
    ///
    /// Returns error if the remote call fails after the provider's bounded
    /// retries, or if the response carries no usable text.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// List models available from this provider
    ///
    /// # Errors
    ///
    /// Returns error if the remote listing call fails
    async fn list_models(&self) -> Result<Vec<ModelInfo>>;
}
