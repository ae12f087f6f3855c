//! Per-mode instruction preambles
//!
//! Each response mode maps to a fixed instruction block placed near the top
//! of the assembled prompt. The blocks are static text: modes carry no
//! state of their own.

use crate::response_mode::ResponseMode;

/// Instruction preamble for deep-dive mode
pub const DEEP_DIVE_INSTRUCTIONS: &str = "\
Provide a detailed, technical explanation. Include:
- Specific technologies and methodologies
- Technical challenges and solutions
- Architecture decisions and trade-offs
- Code-level insights where relevant
Use technical language appropriate for engineers.";

/// Instruction preamble for quick mode
pub const QUICK_INSTRUCTIONS: &str = "\
Provide a concise, factual answer. Use:
- Bullet points for lists
- Direct, brief sentences
- Key facts only, no elaboration
- 2-4 sentences maximum";

/// Instruction preamble for story mode
pub const STORY_INSTRUCTIONS: &str = "\
Provide a personal, narrative-style answer. Include:
- Personal motivations and values
- Journey and decision-making process
- Emotional connection to the work
- Impact on communities
Use first-person storytelling tone.";

/// Instruction preamble for default mode
pub const DEFAULT_INSTRUCTIONS: &str = "\
Provide a balanced, conversational answer.
Be clear, informative, and personable.
Use 3-5 sentences with natural flow.";

/// Get the instruction preamble for a response mode
///
/// # Arguments
///
/// * `mode` - The resolved response mode
///
/// # Returns
///
/// The static instruction block for that mode
///
/// # Examples
///
/// ```
/// use folioqa::prompts::instructions::mode_instructions;
/// use folioqa::response_mode::ResponseMode;
///
/// let block = mode_instructions(ResponseMode::Quick);
/// assert!(block.contains("concise"));
/// ```
pub fn mode_instructions(mode: ResponseMode) -> &'static str {
    match mode {
        ResponseMode::DeepDive => DEEP_DIVE_INSTRUCTIONS,
        ResponseMode::Quick => QUICK_INSTRUCTIONS,
        ResponseMode::Story => STORY_INSTRUCTIONS,
        ResponseMode::Default => DEFAULT_INSTRUCTIONS,
    }
}
