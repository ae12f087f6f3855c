//! Response mode types and utilities
//!
//! This module defines the closed set of response modes for the Q&A
//! endpoint:
//! - Deep-dive mode: detailed technical explanations
//! - Quick mode: brief factual answers
//! - Story mode: personal narrative style
//! - Default mode: balanced conversational answers
//!
//! It also implements mode resolution: explicit mode strings are matched
//! permissively (unknown values coerce to [`ResponseMode::Default`]), and
//! the `auto` sentinel triggers keyword-based inference from the question.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel mode string requesting keyword-based inference
pub const AUTO_MODE: &str = "auto";

/// Keywords whose presence in a question selects deep-dive mode
const DEEP_DIVE_KEYWORDS: &[&str] = &[
    "how did",
    "explain",
    "technical",
    "architecture",
    "implement",
    "design",
    "build",
    "develop",
    "challenge",
    "approach",
];

/// Keywords whose presence in a question selects quick mode
const QUICK_KEYWORDS: &[&str] = &["what is", "which", "when", "where", "list", "name"];

/// Keywords whose presence in a question selects story mode
const STORY_KEYWORDS: &[&str] = &[
    "why",
    "journey",
    "background",
    "story",
    "motivation",
    "inspired",
];

/// Response mode for a single exchange
///
/// Determines which instruction preamble is placed at the top of the
/// assembled prompt and therefore the length and tone of the answer.
/// Modes carry no internal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseMode {
    /// Detailed, technical explanation aimed at engineers
    DeepDive,

    /// Concise, factual answer with no elaboration
    Quick,

    /// Personal, narrative-style answer
    Story,

    /// Balanced, conversational answer
    Default,
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeepDive => write!(f, "deep-dive"),
            Self::Quick => write!(f, "quick"),
            Self::Story => write!(f, "story"),
            Self::Default => write!(f, "default"),
        }
    }
}

impl ResponseMode {
    /// All modes in a stable order, for service descriptors and stats
    pub const ALL: [ResponseMode; 4] = [
        ResponseMode::DeepDive,
        ResponseMode::Quick,
        ResponseMode::Story,
        ResponseMode::Default,
    ];

    /// Parse a response mode from a string
    ///
    /// # Arguments
    ///
    /// * `s` - String representation of the mode ("deep-dive", "quick",
    ///   "story", or "default")
    ///
    /// # Returns
    ///
    /// Returns the parsed ResponseMode or an error if the string is invalid
    ///
    /// # Examples
    ///
    /// ```
    /// use folioqa::response_mode::ResponseMode;
    ///
    /// let mode = ResponseMode::parse_str("deep-dive").unwrap();
    /// assert_eq!(mode, ResponseMode::DeepDive);
    /// ```
    pub fn parse_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "deep-dive" => Ok(Self::DeepDive),
            "quick" => Ok(Self::Quick),
            "story" => Ok(Self::Story),
            "default" => Ok(Self::Default),
            other => Err(format!("Unknown response mode: {}", other)),
        }
    }

    /// Resolve an optional caller-supplied mode string to a valid mode
    ///
    /// Known mode strings map to their mode. An absent string, the `auto`
    /// sentinel, and unrecognized strings all coerce to a valid mode and
    /// never produce an error: `auto` (and absence, which defaults to the
    /// configured mode string) runs keyword detection against the question,
    /// while unrecognized strings fall back to [`ResponseMode::Default`]
    /// with a warning so caller typos stay observable.
    ///
    /// # Arguments
    ///
    /// * `requested` - The caller-supplied mode string, if any
    /// * `question` - The question text, used when inference is requested
    ///
    /// # Examples
    ///
    /// ```
    /// use folioqa::response_mode::ResponseMode;
    ///
    /// assert_eq!(
    ///     ResponseMode::resolve(Some("story"), "anything"),
    ///     ResponseMode::Story
    /// );
    /// assert_eq!(
    ///     ResponseMode::resolve(Some("bogus"), "anything"),
    ///     ResponseMode::Default
    /// );
    /// assert_eq!(
    ///     ResponseMode::resolve(None, "explain the architecture"),
    ///     ResponseMode::DeepDive
    /// );
    /// ```
    pub fn resolve(requested: Option<&str>, question: &str) -> Self {
        match requested {
            None => Self::detect(question),
            Some(s) if s.eq_ignore_ascii_case(AUTO_MODE) => Self::detect(question),
            Some(s) => match Self::parse_str(s) {
                Ok(mode) => mode,
                Err(_) => {
                    tracing::warn!("Unknown response mode {:?}, coercing to default", s);
                    Self::Default
                }
            },
        }
    }

    /// Infer the response mode from the question text
    ///
    /// Matching is case-insensitive substring search against fixed keyword
    /// lists, checked in priority order: deep-dive, quick, story. A question
    /// matching none of the lists gets [`ResponseMode::Default`].
    ///
    /// # Arguments
    ///
    /// * `question` - The question text to classify
    ///
    /// # Examples
    ///
    /// ```
    /// use folioqa::response_mode::ResponseMode;
    ///
    /// assert_eq!(
    ///     ResponseMode::detect("How did you implement the tokenizer?"),
    ///     ResponseMode::DeepDive
    /// );
    /// assert_eq!(
    ///     ResponseMode::detect("Tell me about your cat"),
    ///     ResponseMode::Default
    /// );
    /// ```
    pub fn detect(question: &str) -> Self {
        let lowered = question.to_lowercase();

        if DEEP_DIVE_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            return Self::DeepDive;
        }
        if QUICK_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            return Self::Quick;
        }
        if STORY_KEYWORDS.iter().any(|k| lowered.contains(k)) {
            return Self::Story;
        }

        Self::Default
    }

    /// Get a user-friendly description of this mode
    ///
    /// # Returns
    ///
    /// A description of the answers the mode produces
    pub fn description(&self) -> &'static str {
        match self {
            Self::DeepDive => "Detailed technical explanations",
            Self::Quick => "Brief factual answers",
            Self::Story => "Personal narrative style",
            Self::Default => "Balanced conversational",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_mode_display() {
        assert_eq!(ResponseMode::DeepDive.to_string(), "deep-dive");
        assert_eq!(ResponseMode::Quick.to_string(), "quick");
        assert_eq!(ResponseMode::Story.to_string(), "story");
        assert_eq!(ResponseMode::Default.to_string(), "default");
    }

    #[test]
    fn test_parse_str_all_known_modes() {
        assert_eq!(
            ResponseMode::parse_str("deep-dive").unwrap(),
            ResponseMode::DeepDive
        );
        assert_eq!(ResponseMode::parse_str("quick").unwrap(), ResponseMode::Quick);
        assert_eq!(ResponseMode::parse_str("story").unwrap(), ResponseMode::Story);
        assert_eq!(
            ResponseMode::parse_str("default").unwrap(),
            ResponseMode::Default
        );
    }

    #[test]
    fn test_parse_str_case_insensitive() {
        assert_eq!(
            ResponseMode::parse_str("DEEP-DIVE").unwrap(),
            ResponseMode::DeepDive
        );
        assert_eq!(ResponseMode::parse_str("Quick").unwrap(), ResponseMode::Quick);
    }

    #[test]
    fn test_parse_str_invalid() {
        assert!(ResponseMode::parse_str("verbose").is_err());
        assert!(ResponseMode::parse_str("").is_err());
    }

    #[test]
    fn test_resolve_explicit_known_mode_round_trips() {
        for mode in ResponseMode::ALL {
            let resolved = ResponseMode::resolve(Some(&mode.to_string()), "irrelevant");
            assert_eq!(resolved, mode);
        }
    }

    #[test]
    fn test_resolve_unknown_mode_coerces_to_default() {
        assert_eq!(
            ResponseMode::resolve(Some("verbose"), "explain the design"),
            ResponseMode::Default
        );
        assert_eq!(
            ResponseMode::resolve(Some(""), "explain the design"),
            ResponseMode::Default
        );
    }

    #[test]
    fn test_resolve_absent_mode_runs_detection() {
        assert_eq!(
            ResponseMode::resolve(None, "Explain the architecture in detail"),
            ResponseMode::DeepDive
        );
        assert_eq!(
            ResponseMode::resolve(None, "Hi there"),
            ResponseMode::Default
        );
    }

    #[test]
    fn test_resolve_auto_sentinel_runs_detection() {
        assert_eq!(
            ResponseMode::resolve(Some("auto"), "Why did you start this journey?"),
            ResponseMode::Story
        );
        assert_eq!(
            ResponseMode::resolve(Some("AUTO"), "What is the dataset size?"),
            ResponseMode::Quick
        );
    }

    #[test]
    fn test_detect_deep_dive_keywords() {
        assert_eq!(
            ResponseMode::detect("How did you build the translation model?"),
            ResponseMode::DeepDive
        );
        assert_eq!(
            ResponseMode::detect("Describe the ARCHITECTURE please"),
            ResponseMode::DeepDive
        );
    }

    #[test]
    fn test_detect_quick_keywords() {
        assert_eq!(
            ResponseMode::detect("What is the largest Igala corpus?"),
            ResponseMode::Quick
        );
        assert_eq!(
            ResponseMode::detect("List your projects"),
            ResponseMode::Quick
        );
    }

    #[test]
    fn test_detect_story_keywords() {
        assert_eq!(
            ResponseMode::detect("Tell me about your journey"),
            ResponseMode::Story
        );
        assert_eq!(
            ResponseMode::detect("why do you care about low-resource languages"),
            ResponseMode::Story
        );
    }

    #[test]
    fn test_detect_priority_deep_dive_wins_over_story() {
        // Contains both "explain" (deep-dive) and "why" (story)
        assert_eq!(
            ResponseMode::detect("Explain why the attention heads specialize"),
            ResponseMode::DeepDive
        );
    }

    #[test]
    fn test_detect_no_keywords_defaults() {
        assert_eq!(ResponseMode::detect("Hello!"), ResponseMode::Default);
    }

    #[test]
    fn test_serde_kebab_case_round_trip() {
        let json = serde_json::to_string(&ResponseMode::DeepDive).unwrap();
        assert_eq!(json, "\"deep-dive\"");
        let back: ResponseMode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ResponseMode::DeepDive);
    }

    #[test]
    fn test_description_nonempty_for_all_modes() {
        for mode in ResponseMode::ALL {
            assert!(!mode.description().is_empty());
        }
    }
}
