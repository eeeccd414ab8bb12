//! The chat-completion boundary.
//!
//! The real endpoint lives outside the core; callers hand the engine any
//! [`ChatCompletion`] implementation together with the user-supplied
//! [`ApiKey`] it must authenticate with. Tests use [`MockCompletion`].

use std::sync::Mutex;

use crate::error::AssistError;
use crate::types::{ApiKey, CompletionRequest};

/// A chat-completion service: one authenticated request in, one assistant
/// message out.
pub trait ChatCompletion {
    fn complete(&self, key: &ApiKey, request: &CompletionRequest) -> Result<String, AssistError>;
}

impl<T: ChatCompletion + ?Sized> ChatCompletion for &T {
    fn complete(&self, key: &ApiKey, request: &CompletionRequest) -> Result<String, AssistError> {
        (**self).complete(key, request)
    }
}

/// Mock completion service with a canned outcome.
///
/// Records every request and key it receives so tests can assert on the
/// prompt, model, and credentials actually sent.
#[derive(Debug)]
pub struct MockCompletion {
    outcome: Result<String, String>,
    requests: Mutex<Vec<CompletionRequest>>,
    keys: Mutex<Vec<ApiKey>>,
}

impl MockCompletion {
    /// Always answer with the given text.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            outcome: Ok(reply.into()),
            requests: Mutex::new(Vec::new()),
            keys: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            requests: Mutex::new(Vec::new()),
            keys: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Keys received so far, in call order.
    pub fn keys(&self) -> Vec<ApiKey> {
        self.keys
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl ChatCompletion for MockCompletion {
    fn complete(&self, key: &ApiKey, request: &CompletionRequest) -> Result<String, AssistError> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request.clone());
        self.keys
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(key.clone());
        match &self.outcome {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(AssistError::Completion(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_MODEL;

    fn key() -> ApiKey {
        ApiKey::from_text("test-token").unwrap()
    }

    #[test]
    fn test_mock_returns_canned_reply_and_records_request() {
        let mock = MockCompletion::new("hello back");
        let request = CompletionRequest::new(DEFAULT_MODEL, "be kind", "hello");
        assert_eq!(mock.complete(&key(), &request).unwrap(), "hello back");

        let seen = mock.requests();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], request);
        assert_eq!(mock.keys(), vec![key()]);
    }

    #[test]
    fn test_failing_mock() {
        let mock = MockCompletion::failing("endpoint unreachable");
        let request = CompletionRequest::new(DEFAULT_MODEL, "be kind", "hello");
        let err = mock.complete(&key(), &request).unwrap_err();
        assert!(matches!(err, AssistError::Completion(_)));
        assert!(err.to_string().contains("endpoint unreachable"));
    }
}
