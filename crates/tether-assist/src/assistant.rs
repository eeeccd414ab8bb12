//! The assistant engine: prompt, complete, clean, log.

use tracing::debug;

use tether_core::config::AssistConfig;
use tether_core::types::MessageRecord;
use tether_store::Session;

use crate::client::ChatCompletion;
use crate::error::AssistError;
use crate::prompt::{ChatMode, PersonaBundle, PromptBuilder};
use crate::types::{ApiKey, CompletionRequest};

/// Strip one pair of surrounding double quotes from a model answer.
///
/// Persona models habitually quote their single-sentence replies.
pub fn clean_answer(answer: &str) -> String {
    let mut cleaned = answer.trim();
    if let Some(rest) = cleaned.strip_prefix('"') {
        cleaned = rest;
    }
    if let Some(rest) = cleaned.strip_suffix('"') {
        cleaned = rest;
    }
    cleaned.to_string()
}

/// Both records written by one assistant exchange.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    /// The human's message, logged with the correspondent as sender.
    pub question: MessageRecord,
    /// The persona's answer, logged with the owner as sender: the assistant
    /// speaks as the MND patient.
    pub answer: MessageRecord,
}

/// Drives completions against whatever [`ChatCompletion`] it is given.
pub struct Assistant<C: ChatCompletion> {
    client: C,
    api_key: ApiKey,
    model: String,
    mode: ChatMode,
    persona: Option<PersonaBundle>,
    max_message_chars: usize,
    prompt_builder: PromptBuilder,
}

impl<C: ChatCompletion> Assistant<C> {
    /// The key is the user-supplied endpoint token; it is handed to the
    /// client on every completion.
    pub fn new(client: C, api_key: ApiKey, config: &AssistConfig) -> Result<Self, AssistError> {
        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            mode: ChatMode::from_name(&config.mode)?,
            persona: None,
            max_message_chars: config.max_message_chars,
            prompt_builder: PromptBuilder,
        })
    }

    /// Attach persona material, switching prompts to mimicry content when
    /// the mode is experimental.
    pub fn with_persona(mut self, persona: PersonaBundle) -> Self {
        self.persona = Some(persona);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Run one completion for a user message and return the cleaned answer.
    pub fn ask(&self, text: &str) -> Result<String, AssistError> {
        if text.trim().is_empty() {
            return Err(AssistError::EmptyMessage);
        }
        if text.chars().count() > self.max_message_chars {
            return Err(AssistError::MessageTooLong(self.max_message_chars));
        }
        let system_prompt = self
            .prompt_builder
            .system_prompt(self.mode, self.persona.as_ref())?;
        let request = CompletionRequest::new(&self.model, system_prompt, text);
        let answer = self.client.complete(&self.api_key, &request)?;
        debug!(model = %self.model, "Completion returned");
        Ok(clean_answer(&answer))
    }

    /// Run one exchange and log both sides into the session thread.
    ///
    /// The human chatting with the persona is the correspondent, so their
    /// message is logged under their name; the answer is logged under the
    /// owner's name.
    pub fn exchange(
        &self,
        session: &mut Session,
        correspondent: &str,
        tag: &str,
        text: &str,
    ) -> Result<AssistantReply, AssistError> {
        let answer = self.ask(text)?;
        let owner = session.owner().to_string();
        let question = session.send_message(correspondent, tag, correspondent, text)?;
        let answer = session.send_message(correspondent, tag, &owner, &answer)?;
        Ok(AssistantReply { question, answer })
    }
}
