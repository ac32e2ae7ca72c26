//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. The screening core has a single
//! collaborator: the text-completion service.

mod completion;

pub use completion::{
    ChatMessage, ChatRole, CompletionError, CompletionProvider, CompletionRequest,
    CompletionResponse, ProviderInfo, TokenUsage,
};
