//! Mock completion provider for testing.
//!
//! Configurable mock implementation of the CompletionProvider port, allowing
//! tests to run without calling a real completion API.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for resilience testing
//! - Simulated delays for timeout testing
//! - Call recording for verification
//!
//! # Example
//!
//! ```ignore
//! let provider = MockProvider::new()
//!     .with_reply("Thanks! What's your phone number?")
//!     .with_error(CompletionError::Timeout { timeout_secs: 30 });
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// Reply returned when the configured queue is exhausted.
const DEFAULT_REPLY: &str = "Understood. Could you tell me a bit more?";

/// A configured mock outcome.
#[derive(Debug, Clone)]
enum MockReply {
    /// Return this content as a successful completion.
    Reply(String),
    /// Return this error.
    Error(CompletionError),
}

/// Mock completion provider for testing.
///
/// Clones share the same queue and call log, so a test can keep a handle
/// for inspection while the processor owns the provider.
#[derive(Debug, Clone)]
pub struct MockProvider {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    delay: Duration,
    info: ProviderInfo,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Creates a new mock provider with an empty queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
            info: ProviderInfo::new("mock", "mock-model-1"),
        }
    }

    /// Queues a successful reply.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(MockReply::Reply(content.into()));
        self
    }

    /// Queues an error.
    pub fn with_error(self, error: CompletionError) -> Self {
        self.replies
            .lock()
            .expect("mock reply queue poisoned")
            .push_back(MockReply::Error(error));
        self
    }

    /// Sets a simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Returns how many completion calls were made.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("mock call log poisoned").len()
    }

    /// Returns the most recent request, if any call was made.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .last()
            .cloned()
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = self
            .replies
            .lock()
            .expect("mock reply queue poisoned")
            .pop_front();

        match next {
            Some(MockReply::Reply(content)) => Ok(CompletionResponse {
                content,
                model: self.info.model.clone(),
                usage: None,
            }),
            Some(MockReply::Error(error)) => Err(error),
            None => Ok(CompletionResponse {
                content: DEFAULT_REPLY.to_string(),
                model: self.info.model.clone(),
                usage: None,
            }),
        }
    }

    fn provider_info(&self) -> ProviderInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ChatRole;

    fn request(content: &str) -> CompletionRequest {
        CompletionRequest::new().with_message(ChatRole::User, content)
    }

    #[tokio::test]
    async fn returns_queued_replies_in_order() {
        let provider = MockProvider::new()
            .with_reply("first")
            .with_reply("second");

        let r1 = provider.complete(request("a")).await.unwrap();
        let r2 = provider.complete(request("b")).await.unwrap();

        assert_eq!(r1.content, "first");
        assert_eq!(r2.content, "second");
    }

    #[tokio::test]
    async fn returns_queued_errors() {
        let provider =
            MockProvider::new().with_error(CompletionError::Timeout { timeout_secs: 5 });

        let result = provider.complete(request("a")).await;

        assert!(matches!(
            result,
            Err(CompletionError::Timeout { timeout_secs: 5 })
        ));
    }

    #[tokio::test]
    async fn exhausted_queue_falls_back_to_default_reply() {
        let provider = MockProvider::new();
        let response = provider.complete(request("a")).await.unwrap();
        assert_eq!(response.content, DEFAULT_REPLY);
    }

    #[tokio::test]
    async fn records_calls_for_inspection() {
        let provider = MockProvider::new();
        let handle = provider.clone();

        provider.complete(request("hello there")).await.unwrap();

        assert_eq!(handle.call_count(), 1);
        let recorded = handle.last_request().unwrap();
        assert_eq!(recorded.messages[0].content, "hello there");
    }

    #[test]
    fn provider_info_identifies_mock() {
        let provider = MockProvider::new();
        assert_eq!(provider.provider_info().name, "mock");
    }
}
