//! Screening conversation domain.
//!
//! The conversation state machine and entity-extraction pipeline:
//! - [`ScreeningSession`]: collected fields, append-only history, phase
//! - [`FieldExtractor`]: pure scanners for email/phone/experience
//! - [`TurnProcessor`]: the per-turn algorithm and session entry points

mod extractor;
mod fields;
mod message;
mod phase;
mod processor;
mod prompts;
mod sanitizer;
mod session;

pub use extractor::{FieldExtractor, MAX_EXPERIENCE_YEARS, MAX_PHONE_DIGITS, MIN_PHONE_DIGITS};
pub use fields::{CandidateFields, FieldKind, PartialFields};
pub use message::{Message, MessageId, Role};
pub use phase::ScreeningPhase;
pub use processor::{
    contains_termination_token, TurnError, TurnProcessor, TurnProcessorConfig,
    TERMINATION_TOKENS,
};
pub use prompts::{compose_system_prompt, FAREWELL_MESSAGE, OPENING_MESSAGE};
pub use sanitizer::{ReplySanitizer, SanitizeError, MAX_REPLY_LENGTH};
pub use session::ScreeningSession;
