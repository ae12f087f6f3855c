//! In-memory conversation session store
//!
//! This module implements the bounded conversation-history store: a
//! process-lifetime map from opaque session keys to ordered exchange
//! histories. Histories are capped at a fixed number of most-recent
//! exchanges with FIFO eviction, modeled as a fixed-capacity deque rather
//! than a growable list with manual truncation.
//!
//! All state is lost on process restart. That is a documented property of
//! the service, not a bug: sessions are sacrificial.

use crate::response_mode::ResponseMode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock};

/// Default cap on stored exchanges per session
pub const DEFAULT_MAX_EXCHANGES: usize = 10;

/// One user-question/assistant-answer pair
///
/// Exchanges are immutable once appended: they are never mutated or
/// reordered, only evicted from the front when the session cap is hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    /// The user's question text
    pub question: String,
    /// The assistant's answer text
    pub answer: String,
    /// The response mode the answer was generated under
    pub mode: ResponseMode,
    /// When the exchange was recorded
    pub timestamp: DateTime<Utc>,
}

impl Exchange {
    /// Create a new exchange stamped with the current time
    ///
    /// # Arguments
    ///
    /// * `question` - The user's question text
    /// * `answer` - The assistant's answer text
    /// * `mode` - The response mode used to generate the answer
    ///
    /// # Examples
    ///
    /// ```
    /// use folioqa::response_mode::ResponseMode;
    /// use folioqa::session::Exchange;
    ///
    /// let exchange = Exchange::new("Hi", "Hello!", ResponseMode::Default);
    /// assert_eq!(exchange.question, "Hi");
    /// ```
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        mode: ResponseMode,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            mode,
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, bounded history of exchanges for one session
///
/// Maintains chronological order. When an append would exceed the cap the
/// oldest exchange is dropped first.
#[derive(Debug, Clone, Default)]
pub struct SessionHistory {
    exchanges: VecDeque<Exchange>,
}

impl SessionHistory {
    /// Append an exchange, evicting the oldest entry if `max_exchanges`
    /// would be exceeded
    fn push(&mut self, exchange: Exchange, max_exchanges: usize) {
        if self.exchanges.len() >= max_exchanges {
            self.exchanges.pop_front();
        }
        self.exchanges.push_back(exchange);
    }

    /// Number of stored exchanges
    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// Exchanges in chronological order, oldest first
    pub fn exchanges(&self) -> impl Iterator<Item = &Exchange> {
        self.exchanges.iter()
    }

    /// The most recent `window` exchanges in chronological order
    ///
    /// Used by the prompt assembler, which serializes only a recent window
    /// of the stored history into the prompt.
    pub fn recent(&self, window: usize) -> Vec<Exchange> {
        let skip = self.exchanges.len().saturating_sub(window);
        self.exchanges.iter().skip(skip).cloned().collect()
    }
}

/// Process-lifetime session store
///
/// An explicitly owned store object with a defined concurrency discipline:
/// one `RwLock` guards the whole map, and guards are never held across an
/// `.await`. Concurrent appends to the same session serialize in an
/// unspecified order, which is a documented limitation of the service.
///
/// # Examples
///
/// ```
/// use folioqa::response_mode::ResponseMode;
/// use folioqa::session::{Exchange, SessionStore};
///
/// let store = SessionStore::new(10);
/// let history = store.get_or_create("s1");
/// assert!(history.is_empty());
///
/// store.append("s1", Exchange::new("Hi", "Hello!", ResponseMode::Default));
/// assert_eq!(store.get_or_create("s1").len(), 1);
/// ```
#[derive(Debug)]
pub struct SessionStore {
    max_exchanges: usize,
    sessions: RwLock<HashMap<String, SessionHistory>>,
}

impl SessionStore {
    /// Create a new store with the given per-session exchange cap
    ///
    /// # Arguments
    ///
    /// * `max_exchanges` - Maximum exchanges retained per session (minimum 1)
    pub fn new(max_exchanges: usize) -> Self {
        Self {
            max_exchanges: max_exchanges.max(1),
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// The configured per-session exchange cap
    pub fn max_exchanges(&self) -> usize {
        self.max_exchanges
    }

    /// Return a snapshot of the session's history, creating an empty
    /// session if the key is new
    ///
    /// Never fails. The returned history is a clone: callers read a
    /// consistent snapshot without holding the store lock.
    ///
    /// # Arguments
    ///
    /// * `session_id` - Opaque session key
    pub fn get_or_create(&self, session_id: &str) -> SessionHistory {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        sessions.entry(session_id.to_string()).or_default().clone()
    }

    /// Look up a session's history without creating it
    ///
    /// # Arguments
    ///
    /// * `session_id` - Opaque session key
    ///
    /// # Returns
    ///
    /// A snapshot of the history, or `None` if the session does not exist
    pub fn get(&self, session_id: &str) -> Option<SessionHistory> {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.get(session_id).cloned()
    }

    /// Append an exchange to a session's history
    ///
    /// Creates the session if the key is new. If the resulting length would
    /// exceed the cap, the oldest exchange is evicted first.
    ///
    /// # Arguments
    ///
    /// * `session_id` - Opaque session key
    /// * `exchange` - The exchange to record
    ///
    /// # Returns
    ///
    /// The session's history length after the append
    pub fn append(&self, session_id: &str, exchange: Exchange) -> usize {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let history = sessions.entry(session_id.to_string()).or_default();
        history.push(exchange, self.max_exchanges);
        history.len()
    }

    /// Number of sessions currently held in the store
    pub fn session_count(&self) -> usize {
        let sessions = self.sessions.read().unwrap_or_else(PoisonError::into_inner);
        sessions.len()
    }
}
