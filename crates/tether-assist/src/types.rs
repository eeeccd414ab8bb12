//! Wire types for the chat-completion collaborator.

use serde::{Deserialize, Serialize};

use crate::error::AssistError;

/// Models accepted by the completion endpoint, in picker order.
pub const MODEL_CHOICES: [&str; 18] = [
    "llama-7b-chat",
    "llama-7b-32k",
    "llama-13b-chat",
    "llama-70b-chat",
    "mixtral-8x7b-instruct",
    "mistral-7b-instruct",
    "mistral-7b",
    "Nous-Hermes-Llama2-13b",
    "falcon-7b-instruct",
    "falcon-40b-instruct",
    "alpaca-7b",
    "codellama-7b-instruct",
    "codellama-13b-instruct",
    "codellama-34b-instruct",
    "openassistant-llama2-70b",
    "vicuna-7b",
    "vicuna-13b",
    "vicuna-13b-16k",
];

pub const DEFAULT_MODEL: &str = "llama-7b-chat";

/// Role of one message in a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One message in a completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ApiMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// The request body sent to the completion endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ApiMessage>,
    pub stream: bool,
}

impl CompletionRequest {
    /// A non-streaming system + user request, the only shape the core uses.
    pub fn new(
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ApiMessage::system(system_prompt),
                ApiMessage::user(user_message),
            ],
            stream: false,
        }
    }
}

/// A completion API token, supplied by the user as an uploaded text file.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Read a key from file text, trimming surrounding whitespace.
    pub fn from_text(text: &str) -> Result<Self, AssistError> {
        let key = text.trim();
        if key.is_empty() {
            return Err(AssistError::MissingApiKey);
        }
        Ok(Self(key.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(****)")
    }
}
