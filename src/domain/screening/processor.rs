//! Turn processing for screening sessions.
//!
//! The turn processor owns the per-turn algorithm: record the candidate
//! message, check termination, run extraction, advance the phase machine,
//! compose the completion context, and append the assistant reply.
//!
//! Termination is ordinary control flow, not an error: a matched token is a
//! plain state transition to `Ended` with a fixed farewell.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::DomainError;
use crate::ports::{
    ChatRole, CompletionError, CompletionProvider, CompletionRequest,
};

use super::extractor::FieldExtractor;
use super::message::Role;
use super::phase::ScreeningPhase;
use super::prompts::{compose_system_prompt, FAREWELL_MESSAGE, OPENING_MESSAGE};
use super::sanitizer::{ReplySanitizer, SanitizeError};
use super::session::ScreeningSession;

/// Tokens that end the conversation, regardless of phase.
pub const TERMINATION_TOKENS: [&str; 3] = ["bye", "exit", "quit"];

/// Returns true if the message asks to end the conversation.
///
/// The trimmed, lowercased message either equals a termination token or
/// contains one as a standalone word (punctuation stripped), so "ok, bye!"
/// terminates while "maybe" does not.
pub fn contains_termination_token(text: &str) -> bool {
    let trimmed = text.trim().to_lowercase();
    if TERMINATION_TOKENS.contains(&trimmed.as_str()) {
        return true;
    }
    trimmed.split_whitespace().any(|word| {
        let word = word.trim_matches(|c: char| !c.is_ascii_alphanumeric());
        TERMINATION_TOKENS.contains(&word)
    })
}

/// Tunables for turn processing.
#[derive(Debug, Clone)]
pub struct TurnProcessorConfig {
    /// How many recent history messages go into the completion context.
    pub history_window: usize,
    /// Maximum tokens the provider may generate per reply.
    pub max_tokens: u32,
    /// Sampling temperature for replies.
    pub temperature: f32,
}

impl Default for TurnProcessorConfig {
    fn default() -> Self {
        Self {
            history_window: 24,
            max_tokens: 250,
            temperature: 0.4,
        }
    }
}

/// Errors that can occur when processing a turn.
#[derive(Debug, Clone, Error)]
pub enum TurnError {
    /// The session has already ended; the state was not modified.
    #[error("session already ended")]
    SessionEnded,

    /// The candidate message is empty or whitespace only.
    #[error("message content cannot be empty")]
    EmptyMessage,

    /// The completion provider failed. The candidate turn stays recorded,
    /// no assistant turn was appended; retrying is safe.
    #[error("completion provider failed: {0}")]
    Completion(#[from] CompletionError),

    /// The provider's reply failed sanitization.
    #[error("assistant reply rejected: {0}")]
    InvalidReply(#[from] SanitizeError),

    /// A domain invariant was violated.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Processes screening turns against a completion provider.
///
/// Holds no per-session state: sessions are passed in by the caller, and
/// `&mut ScreeningSession` guarantees that no second turn starts before the
/// first one resolves.
pub struct TurnProcessor {
    provider: Arc<dyn CompletionProvider>,
    extractor: FieldExtractor,
    sanitizer: ReplySanitizer,
    config: TurnProcessorConfig,
}

impl TurnProcessor {
    /// Creates a processor with default configuration.
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self::with_config(provider, TurnProcessorConfig::default())
    }

    /// Creates a processor with explicit configuration.
    pub fn with_config(provider: Arc<dyn CompletionProvider>, config: TurnProcessorConfig) -> Self {
        Self {
            provider,
            extractor: FieldExtractor::new(),
            sanitizer: ReplySanitizer::new(),
            config,
        }
    }

    /// Starts a new session.
    ///
    /// The returned session has the fixed opening message in its history and
    /// is already collecting: the candidate's first reply goes straight
    /// through [`TurnProcessor::submit_turn`].
    pub fn start_session(&self) -> ScreeningSession {
        let mut session = ScreeningSession::new();
        session
            .record_assistant_message(OPENING_MESSAGE)
            .expect("fresh session accepts the opening message");
        session
            .begin_collecting()
            .expect("fresh session transitions to collecting");
        tracing::debug!(session_id = %session.id(), "session started");
        session
    }

    /// Processes one candidate turn.
    ///
    /// Returns the assistant's reply. On [`TurnError::Completion`] the
    /// candidate turn is already recorded and the same session can be
    /// retried; on [`TurnError::SessionEnded`] the session is untouched.
    pub async fn submit_turn(
        &self,
        session: &mut ScreeningSession,
        text: &str,
    ) -> Result<String, TurnError> {
        if session.is_ended() {
            return Err(TurnError::SessionEnded);
        }
        if text.trim().is_empty() {
            return Err(TurnError::EmptyMessage);
        }

        // (1) record the candidate turn
        session.record_candidate_message(text)?;

        // (2) termination takes precedence over extraction and prompting
        if contains_termination_token(text) {
            tracing::debug!(session_id = %session.id(), phase = ?session.phase(), "termination token detected");
            session.begin_closing()?;
            session.record_assistant_message(FAREWELL_MESSAGE)?;
            session.finish()?;
            return Ok(FAREWELL_MESSAGE.to_string());
        }

        // (3) extraction only while collecting
        if session.phase().runs_extraction() {
            let partial = self.extractor.extract(text);
            let changed = session.merge_fields(partial);
            if !changed.is_empty() {
                tracing::debug!(session_id = %session.id(), fields = ?changed, "extracted candidate fields");
            }
            if session.fields().is_complete() && session.phase() == ScreeningPhase::CollectingInfo {
                session.begin_interviewing()?;
                tracing::debug!(session_id = %session.id(), "all fields collected, moving to interview");
            }
        }

        // (4) compose context and delegate to the completion provider
        let request = self.compose_request(session);
        let response = self.provider.complete(request).await?;
        if response.content.trim().is_empty() {
            return Err(TurnError::Completion(CompletionError::EmptyReply));
        }
        let reply = self.sanitizer.sanitize(&response.content)?;

        // (5) append the assistant reply
        session.record_assistant_message(&reply)?;

        Ok(reply)
    }

    fn compose_request(&self, session: &ScreeningSession) -> CompletionRequest {
        let system_prompt = compose_system_prompt(session.phase(), session.fields());
        let mut request = CompletionRequest::new()
            .with_system_prompt(system_prompt)
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(self.config.temperature);

        for message in session.context_messages(self.config.history_window) {
            let role = match message.role() {
                Role::System => ChatRole::System,
                Role::Candidate => ChatRole::User,
                Role::Assistant => ChatRole::Assistant,
            };
            request = request.with_message(role, message.content());
        }

        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockProvider;

    fn processor(provider: MockProvider) -> TurnProcessor {
        TurnProcessor::new(Arc::new(provider))
    }

    mod termination_tokens {
        use super::*;

        #[test]
        fn exact_tokens_terminate() {
            for token in ["bye", "exit", "quit"] {
                assert!(contains_termination_token(token), "{} should match", token);
            }
        }

        #[test]
        fn matching_is_case_insensitive_and_trimmed() {
            assert!(contains_termination_token("  QUIT  "));
            assert!(contains_termination_token("Bye"));
        }

        #[test]
        fn token_as_a_word_terminates() {
            assert!(contains_termination_token("ok, bye!"));
            assert!(contains_termination_token("I want to exit now"));
        }

        #[test]
        fn token_inside_another_word_does_not_terminate() {
            assert!(!contains_termination_token("maybe"));
            assert!(!contains_termination_token("the exits were crowded"));
            assert!(!contains_termination_token("goodbye"));
        }

        #[test]
        fn unrelated_text_does_not_terminate() {
            assert!(!contains_termination_token("tell me about the role"));
        }
    }

    mod start_session {
        use super::*;

        #[test]
        fn begins_collecting_with_opening_message() {
            let processor = processor(MockProvider::new());
            let session = processor.start_session();

            assert_eq!(session.phase(), ScreeningPhase::CollectingInfo);
            assert_eq!(session.message_count(), 1);
            assert_eq!(
                session.last_assistant_message().unwrap().content(),
                OPENING_MESSAGE
            );
            assert!(!session.is_ended());
        }
    }

    mod submit_turn {
        use super::*;

        #[tokio::test]
        async fn rejects_empty_message_without_mutation() {
            let processor = processor(MockProvider::new());
            let mut session = processor.start_session();
            let before = session.message_count();

            let result = processor.submit_turn(&mut session, "   ").await;

            assert!(matches!(result, Err(TurnError::EmptyMessage)));
            assert_eq!(session.message_count(), before);
        }

        #[tokio::test]
        async fn successful_turn_appends_candidate_and_assistant() {
            let provider = MockProvider::new().with_reply("Thanks! And your phone number?");
            let processor = processor(provider);
            let mut session = processor.start_session();

            let reply = processor
                .submit_turn(&mut session, "my email is jane@example.com")
                .await
                .unwrap();

            assert_eq!(reply, "Thanks! And your phone number?");
            // opening + candidate + assistant
            assert_eq!(session.message_count(), 3);
            assert_eq!(session.fields().email(), Some("jane@example.com"));
            assert_eq!(session.phase(), ScreeningPhase::CollectingInfo);
        }

        #[tokio::test]
        async fn termination_skips_provider_and_extraction() {
            let provider = MockProvider::new();
            let calls = provider.clone();
            let processor = processor(provider);
            let mut session = processor.start_session();

            // the message also carries a valid phone number; termination wins
            let reply = processor
                .submit_turn(&mut session, "quit 555-123-4567")
                .await
                .unwrap();

            assert_eq!(reply, FAREWELL_MESSAGE);
            assert!(session.is_ended());
            assert_eq!(session.phase(), ScreeningPhase::Ended);
            assert_eq!(session.fields().phone(), None);
            assert_eq!(calls.call_count(), 0);
        }

        #[tokio::test]
        async fn ended_session_rejects_turns_without_mutation() {
            let processor = processor(MockProvider::new());
            let mut session = processor.start_session();
            processor.submit_turn(&mut session, "bye").await.unwrap();

            let history_len = session.message_count();
            let result = processor.submit_turn(&mut session, "hello again?").await;

            assert!(matches!(result, Err(TurnError::SessionEnded)));
            assert_eq!(session.message_count(), history_len);
        }

        #[tokio::test]
        async fn completes_collection_before_generating_reply() {
            let provider =
                MockProvider::new().with_reply("Great. First question: what is ownership in Rust?");
            let inspect = provider.clone();
            let processor = processor(provider);
            let mut session = processor.start_session();

            processor
                .submit_turn(
                    &mut session,
                    "jane@example.com, +1 555 123 4567, 6 years of experience",
                )
                .await
                .unwrap();

            // phase moved before the completion request was composed
            assert_eq!(session.phase(), ScreeningPhase::Interviewing);
            let request = inspect.last_request().unwrap();
            let system = request.system_prompt.unwrap();
            assert!(system.contains("Interviewing"));
        }

        #[tokio::test]
        async fn interviewing_turns_do_not_touch_fields() {
            let provider = MockProvider::new()
                .with_reply("Noted. Next question.")
                .with_reply("Interesting, tell me more.");
            let processor = processor(provider);
            let mut session = processor.start_session();

            processor
                .submit_turn(&mut session, "jane@example.com, 5551234567, 6 years")
                .await
                .unwrap();
            assert_eq!(session.phase(), ScreeningPhase::Interviewing);

            processor
                .submit_turn(&mut session, "I once debugged 20 services in 2 days")
                .await
                .unwrap();

            // the stray numbers in the answer change nothing
            assert_eq!(session.fields().years_experience(), Some(6.0));
            assert_eq!(session.fields().phone(), Some("5551234567"));
        }

        #[tokio::test]
        async fn empty_provider_reply_is_a_completion_error() {
            let provider = MockProvider::new().with_reply("   ");
            let processor = processor(provider);
            let mut session = processor.start_session();

            let result = processor.submit_turn(&mut session, "hello").await;

            assert!(matches!(
                result,
                Err(TurnError::Completion(CompletionError::EmptyReply))
            ));
            // candidate turn recorded, no assistant turn
            assert!(session.last_message().unwrap().is_candidate());
        }

        #[tokio::test]
        async fn provider_failure_leaves_session_retryable() {
            let provider = MockProvider::new()
                .with_error(CompletionError::Timeout { timeout_secs: 30 })
                .with_reply("Back online. What's your email?");
            let processor = processor(provider);
            let mut session = processor.start_session();

            let failed = processor.submit_turn(&mut session, "hello").await;
            assert!(matches!(failed, Err(TurnError::Completion(_))));
            assert_eq!(session.message_count(), 2); // opening + candidate
            assert!(!session.is_ended());

            let reply = processor.submit_turn(&mut session, "hello").await.unwrap();
            assert_eq!(reply, "Back online. What's your email?");
            assert!(session.last_message().unwrap().is_assistant());
        }

        #[tokio::test]
        async fn context_is_windowed_to_configured_size() {
            let provider = MockProvider::new();
            let inspect = provider.clone();
            let processor = TurnProcessor::with_config(
                Arc::new(provider),
                TurnProcessorConfig {
                    history_window: 4,
                    ..Default::default()
                },
            );
            let mut session = processor.start_session();

            for i in 0..5 {
                processor
                    .submit_turn(&mut session, &format!("message number {}", i))
                    .await
                    .unwrap();
            }

            let request = inspect.last_request().unwrap();
            assert_eq!(request.messages.len(), 4);
        }

        #[tokio::test]
        async fn reply_is_sanitized_before_storage() {
            let provider =
                MockProvider::new().with_reply("<|im_start|>Here is my question<|im_end|>");
            let processor = processor(provider);
            let mut session = processor.start_session();

            let reply = processor.submit_turn(&mut session, "hello").await.unwrap();

            assert!(!reply.contains("<|im_start|>"));
            assert_eq!(session.last_assistant_message().unwrap().content(), reply);
        }
    }
}
