//! Transport-agnostic application state.
//!
//! One `CoreState` is built at startup from `Settings` and shared (via
//! `Arc`) with every request handler. The gate and agents are immutable;
//! the history store guards its own interior mutability.

use crate::agents::{AnswerAgent, SpecialistAgent};
use crate::config::Settings;
use crate::history::HistoryStore;
use crate::validation::QueryGate;

pub struct CoreState {
    pub gate: QueryGate,
    pub history: HistoryStore,
    pub answer_agent: AnswerAgent,
    pub specialist_agent: SpecialistAgent,
}

impl CoreState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            gate: QueryGate::new(),
            history: HistoryStore::new(),
            answer_agent: AnswerAgent::new(
                settings.answer_agent_url.clone(),
                settings.agent_timeout_secs,
            ),
            specialist_agent: SpecialistAgent::new(
                settings.specialist_agent_url.clone(),
                settings.agent_timeout_secs,
            ),
        }
    }
}
