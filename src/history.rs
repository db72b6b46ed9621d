//! Per-session query history.
//!
//! Advisory telemetry only: an in-memory map from session identifier to the
//! most recent interactions, capped per session, lost on restart. Appended
//! after a gated request completes; never read on the hot path.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use serde::Serialize;

/// Most recent entries kept per session; the oldest is evicted on overflow.
const MAX_ENTRIES_PER_SESSION: usize = 10;

/// How much of the cleaned query is kept in the audit record.
const QUERY_SNIPPET_CHARS: usize = 100;

/// One recorded interaction.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    /// RFC 3339 UTC timestamp.
    pub timestamp: String,
    /// Truncated cleaned query.
    pub query: String,
    pub response_length: usize,
    pub confidence: f32,
    pub is_health_related: bool,
}

impl HistoryEntry {
    pub fn new(
        cleaned_query: &str,
        response_length: usize,
        confidence: f32,
        is_health_related: bool,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            query: cleaned_query.chars().take(QUERY_SNIPPET_CHARS).collect(),
            response_length,
            confidence,
            is_health_related,
        }
    }
}

/// Aggregate counters for the stats endpoint.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HistoryStats {
    pub total_sessions: usize,
    pub total_queries: usize,
}

/// Errors from the history store.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Internal lock error")]
    LockPoisoned,
}

/// In-memory session history store.
///
/// The mutex guards memory safety under concurrent requests; the business
/// logic tolerates lost or reordered appends for the same session.
pub struct HistoryStore {
    sessions: Mutex<HashMap<String, VecDeque<HistoryEntry>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Append an entry, evicting the oldest past the per-session cap.
    pub fn record(&self, session_id: &str, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut sessions = self.sessions.lock().map_err(|_| HistoryError::LockPoisoned)?;
        let entries = sessions.entry(session_id.to_string()).or_default();
        entries.push_back(entry);
        while entries.len() > MAX_ENTRIES_PER_SESSION {
            entries.pop_front();
        }
        Ok(())
    }

    /// Entries for one session, oldest first. Unknown sessions yield an
    /// empty list.
    pub fn session_history(&self, session_id: &str) -> Result<Vec<HistoryEntry>, HistoryError> {
        let sessions = self.sessions.lock().map_err(|_| HistoryError::LockPoisoned)?;
        Ok(sessions
            .get(session_id)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default())
    }

    pub fn stats(&self) -> Result<HistoryStats, HistoryError> {
        let sessions = self.sessions.lock().map_err(|_| HistoryError::LockPoisoned)?;
        Ok(HistoryStats {
            total_sessions: sessions.len(),
            total_queries: sessions.values().map(|entries| entries.len()).sum(),
        })
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
