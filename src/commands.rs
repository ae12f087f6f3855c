//! Command handlers for the FolioQA CLI
//!
//! Thin handlers dispatched from `main`: the serve loop lives in the
//! server module; model listing is implemented here.

use crate::config::Config;
use crate::error::Result;
use crate::providers::create_provider;

/// List models available from the configured provider
///
/// Prints one block per model: name, display name, token limits, and a
/// trimmed description.
///
/// # Arguments
///
/// * `config` - Validated service configuration
///
/// # Errors
///
/// Returns error if credentials are missing or the listing call fails
pub async fn models_list(config: Config) -> Result<()> {
    let api_key = config.api_key()?;
    let provider = create_provider(&config.provider, api_key)?;

    let models = provider.list_models().await?;
    tracing::info!("Fetched {} models from {}", models.len(), provider.name());

    if models.is_empty() {
        println!("No models available");
        return Ok(());
    }

    for model in models {
        println!("{}", model.name);
        if !model.display_name.is_empty() {
            println!("  display name: {}", model.display_name);
        }
        if model.input_token_limit > 0 {
            println!(
                "  tokens: {} in / {} out",
                model.input_token_limit, model.output_token_limit
            );
        }
        if !model.description.is_empty() {
            println!("  {}", model.description.trim());
        }
        println!();
    }

    Ok(())
}
