//! Prompt assembly for the Q&A endpoint
//!
//! This module combines the resolved mode's instruction preamble, the
//! portfolio context, a recent window of prior exchanges, and the new
//! question into the single prompt string sent to the generation provider.
//!
//! Assembly is a pure function: identical inputs always produce an
//! identical prompt string, and no external calls are made.

pub mod context;
pub mod instructions;

pub use context::DEFAULT_PORTFOLIO_CONTEXT;
pub use instructions::mode_instructions;

use crate::response_mode::ResponseMode;
use crate::session::Exchange;

/// Build the prompt for a single request
///
/// Layout, top to bottom: persona framing line, mode instruction preamble,
/// the portfolio context block, the prior exchanges (role-tagged,
/// chronological), and finally the current question. History entries are
/// serialized as `User:`/`Assistant:` lines; an empty history omits the
/// previous-conversation section entirely.
///
/// # Arguments
///
/// * `mode` - The resolved response mode
/// * `portfolio_context` - The persona/context block to embed
/// * `history` - Prior exchanges to serialize, already windowed, oldest first
/// * `question` - The new user question
///
/// # Returns
///
/// The complete prompt string for the generation provider
///
/// # Examples
///
/// ```
/// use folioqa::prompts::{build_prompt, DEFAULT_PORTFOLIO_CONTEXT};
/// use folioqa::response_mode::ResponseMode;
///
/// let prompt = build_prompt(
///     ResponseMode::Quick,
///     DEFAULT_PORTFOLIO_CONTEXT,
///     &[],
///     "Which projects are live?",
/// );
/// assert!(prompt.contains("Which projects are live?"));
/// ```
pub fn build_prompt(
    mode: ResponseMode,
    portfolio_context: &str,
    history: &[Exchange],
    question: &str,
) -> String {
    let mut prompt = format!(
        "You are an AI assistant answering questions about a portfolio.\n\
         Answer in first person (as the portfolio owner).\n\n\
         {}\n\n\
         Context:\n{}\n",
        mode_instructions(mode),
        portfolio_context
    );

    if !history.is_empty() {
        prompt.push_str("\n\nPrevious conversation:\n");
        for exchange in history {
            prompt.push_str(&format!("User: {}\n", exchange.question));
            prompt.push_str(&format!("Assistant: {}\n", exchange.answer));
        }
    }

    prompt.push_str(&format!("\n\nCurrent question:\n{}", question));
    prompt
}
