//! LLM-backed assistant persona for the conversation core.
//!
//! The chat-completion endpoint is an external collaborator: this crate
//! defines the request types it accepts, a [`ChatCompletion`] trait at the
//! boundary with a mock for tests, the persona prompt builder, and the
//! exchange flow that logs both sides of an assistant conversation into a
//! session. No network I/O happens here.

pub mod assistant;
pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use assistant::{clean_answer, Assistant, AssistantReply};
pub use client::{ChatCompletion, MockCompletion};
pub use error::AssistError;
pub use prompt::{ChatMode, ExampleMessage, PersonaBundle, PromptBuilder};
pub use types::{ApiKey, ApiMessage, ChatRole, CompletionRequest, DEFAULT_MODEL, MODEL_CHOICES};
