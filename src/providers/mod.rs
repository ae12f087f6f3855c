//! Provider module for FolioQA
//!
//! This module contains the generation-provider abstraction and the Gemini
//! implementation.

pub mod base;
pub mod gemini;

pub use base::{GenerationProvider, ModelInfo};
pub use gemini::GeminiProvider;

use crate::config::ProviderConfig;
use crate::error::{FolioError, Result};

/// Create a provider instance based on configuration
///
/// # Arguments
///
/// * `config` - Provider configuration
/// * `api_key` - API key for the generation service
///
/// # Returns
///
/// Returns a boxed provider instance
///
/// # Errors
///
/// Returns error if the provider type is unknown or initialization fails
pub fn create_provider(
    config: &ProviderConfig,
    api_key: String,
) -> Result<Box<dyn GenerationProvider>> {
    match config.provider_type.as_str() {
        "gemini" => Ok(Box::new(GeminiProvider::new(
            config.gemini.clone(),
            api_key,
        )?)),
        other => Err(FolioError::Provider(format!("Unknown provider type: {}", other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_gemini() {
        let config = ProviderConfig::default();
        let provider = create_provider(&config, "test-key".to_string()).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn test_create_provider_unknown_type() {
        let config = ProviderConfig {
            provider_type: "openai".to_string(),
            ..Default::default()
        };
        assert!(create_provider(&config, "test-key".to_string()).is_err());
    }

    #[test]
    fn test_create_provider_empty_key_fails() {
        let config = ProviderConfig::default();
        assert!(create_provider(&config, String::new()).is_err());
    }
}
