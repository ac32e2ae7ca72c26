//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the screening domain to external systems:
//! - `groq`: the hosted completion service (OpenAI-compatible API)
//! - `mock`: a configurable in-memory provider for tests

mod groq;
mod mock;

pub use groq::{GroqConfig, GroqProvider};
pub use mock::MockProvider;
