//! Screening session entity - Core conversation state.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, StateMachine, Timestamp};

use super::fields::{CandidateFields, FieldKind, PartialFields};
use super::message::Message;
use super::phase::ScreeningPhase;

/// A single screening conversation.
///
/// Owns everything the turn processor mutates:
/// - append-only message history (candidate, assistant, system)
/// - the collected candidate fields
/// - the current phase
/// - the `ended` flag, terminal once set
///
/// Sessions are plain values: one per conversation, created by
/// `TurnProcessor::start_session`, passed back in for every turn, and
/// discarded once ended. There is no process-wide session state.
#[derive(Debug, Clone)]
pub struct ScreeningSession {
    id: SessionId,
    phase: ScreeningPhase,
    fields: CandidateFields,
    history: Vec<Message>,
    ended: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ScreeningSession {
    /// Creates a new session in the `Greeting` phase with empty fields and
    /// history.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            id: SessionId::new(),
            phase: ScreeningPhase::Greeting,
            fields: CandidateFields::new(),
            history: Vec::new(),
            ended: false,
            created_at: now,
            updated_at: now,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> ScreeningPhase {
        self.phase
    }

    pub fn fields(&self) -> &CandidateFields {
        &self.fields
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn message_count(&self) -> usize {
        self.history.len()
    }

    pub fn candidate_message_count(&self) -> usize {
        self.history.iter().filter(|m| m.is_candidate()).count()
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.history.last()
    }

    pub fn last_assistant_message(&self) -> Option<&Message> {
        self.history.iter().rev().find(|m| m.is_assistant())
    }

    // === Message Management ===

    /// Appends a candidate message to the history.
    ///
    /// Only valid in phases that accept candidate input.
    pub fn record_candidate_message(
        &mut self,
        content: impl Into<String>,
    ) -> Result<&Message, DomainError> {
        self.ensure_not_ended()?;
        if !self.phase.accepts_candidate_input() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot record candidate message in {:?} phase", self.phase),
            ));
        }
        let message = Message::candidate(content)?;
        self.push(message)
    }

    /// Appends an assistant message to the history.
    pub fn record_assistant_message(
        &mut self,
        content: impl Into<String>,
    ) -> Result<&Message, DomainError> {
        self.ensure_not_ended()?;
        let message = Message::assistant(content)?;
        self.push(message)
    }

    // === Field Management ===

    /// Merges one turn's extraction result into the collected fields.
    ///
    /// Returns the kinds that changed.
    pub fn merge_fields(&mut self, partial: PartialFields) -> Vec<FieldKind> {
        let changed = self.fields.merge(partial);
        if !changed.is_empty() {
            self.updated_at = Timestamp::now();
        }
        changed
    }

    // === Phase Transitions ===

    /// Transitions to `CollectingInfo` once the opening message is sent.
    pub fn begin_collecting(&mut self) -> Result<(), DomainError> {
        self.advance(ScreeningPhase::CollectingInfo)
    }

    /// Transitions to `Interviewing`.
    ///
    /// Only valid once every required field has been collected.
    pub fn begin_interviewing(&mut self) -> Result<(), DomainError> {
        if !self.fields.is_complete() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Cannot start interviewing with fields still missing",
            ));
        }
        self.advance(ScreeningPhase::Interviewing)
    }

    /// Transitions to `Closing` after a termination token was seen.
    pub fn begin_closing(&mut self) -> Result<(), DomainError> {
        self.advance(ScreeningPhase::Closing)
    }

    /// Transitions from `Closing` to `Ended` and seals the session.
    pub fn finish(&mut self) -> Result<(), DomainError> {
        self.advance(ScreeningPhase::Ended)?;
        self.ended = true;
        Ok(())
    }

    // === Context Building ===

    /// Returns the most recent messages for the completion context.
    pub fn context_messages(&self, max_messages: usize) -> Vec<&Message> {
        let start = self.history.len().saturating_sub(max_messages);
        self.history[start..].iter().collect()
    }

    fn advance(&mut self, target: ScreeningPhase) -> Result<(), DomainError> {
        self.ensure_not_ended()?;
        if !self.phase.can_transition_to(&target) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot transition from {:?} to {:?}", self.phase, target),
            ));
        }
        self.phase = target;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn ensure_not_ended(&self) -> Result<(), DomainError> {
        if self.ended {
            return Err(DomainError::new(
                ErrorCode::SessionEnded,
                "Session already ended",
            ));
        }
        Ok(())
    }

    fn push(&mut self, message: Message) -> Result<&Message, DomainError> {
        self.history.push(message);
        self.updated_at = Timestamp::now();
        self.history
            .last()
            .ok_or_else(|| DomainError::new(ErrorCode::InternalError, "History empty after push"))
    }
}

impl Default for ScreeningSession {
    fn default() -> Self {
        Self::new()
    }
}
