//! Assistant reply sanitization.
//!
//! Cleans completion-provider output before it is appended to the session
//! history: length cap, control characters removed, prompt-injection markers
//! stripped.

use thiserror::Error;

/// Maximum allowed reply length in bytes.
pub const MAX_REPLY_LENGTH: usize = 20_000;

/// Errors that can occur during reply sanitization.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SanitizeError {
    #[error("Reply too long: {actual} bytes exceeds maximum of {max} bytes")]
    TooLong { max: usize, actual: usize },
}

/// Sanitizes assistant replies before storage.
#[derive(Debug, Clone, Default)]
pub struct ReplySanitizer {
    /// Additional prompt injection patterns to strip.
    additional_patterns: Vec<String>,
}

impl ReplySanitizer {
    /// Creates a new sanitizer with default patterns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds additional patterns to strip from replies.
    pub fn with_additional_patterns(mut self, patterns: Vec<String>) -> Self {
        self.additional_patterns = patterns;
        self
    }

    /// Sanitizes a reply.
    ///
    /// # Steps
    /// 1. Validate length
    /// 2. Remove control characters (except newlines/tabs)
    /// 3. Strip potential prompt injection markers
    pub fn sanitize(&self, reply: &str) -> Result<String, SanitizeError> {
        self.validate_length(reply)?;
        let cleaned = self.remove_control_chars(reply);
        Ok(self.strip_injection_markers(&cleaned))
    }

    fn validate_length(&self, s: &str) -> Result<(), SanitizeError> {
        if s.len() > MAX_REPLY_LENGTH {
            return Err(SanitizeError::TooLong {
                max: MAX_REPLY_LENGTH,
                actual: s.len(),
            });
        }
        Ok(())
    }

    fn remove_control_chars(&self, s: &str) -> String {
        s.chars()
            .filter(|c| !c.is_control() || *c == '\n' || *c == '\t' || *c == '\r')
            .collect()
    }

    fn strip_injection_markers(&self, s: &str) -> String {
        // Common prompt injection patterns
        let patterns = [
            "```system",
            "```assistant",
            "[INST]",
            "[/INST]",
            "<|system|>",
            "<|assistant|>",
            "<|user|>",
            "<|im_start|>",
            "<|im_end|>",
            "<<SYS>>",
            "<</SYS>>",
        ];

        let mut result = s.to_string();

        for pattern in patterns {
            result = result.replace(pattern, "");
        }

        for pattern in &self.additional_patterns {
            result = result.replace(pattern, "");
        }

        result
    }
}
