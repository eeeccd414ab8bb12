//! System-prompt construction for the assistant persona.
//!
//! Normal mode is a plain helpful-assistant prompt. Experimental mode builds
//! a persona-mimicry prompt from user-supplied files: two persona JSON
//! documents, a list of the patient's previous messages, and example chat
//! lines shaped `name: content`.

use serde_json::Value;

use crate::error::AssistError;

/// How the assistant behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatMode {
    /// Polite general-purpose assistant.
    #[default]
    Normal,
    /// Mimic the MND patient's communication style from persona files.
    Experimental,
}

impl ChatMode {
    /// Parse a config-file mode name.
    pub fn from_name(name: &str) -> Result<Self, AssistError> {
        match name {
            "normal" => Ok(ChatMode::Normal),
            "experimental" => Ok(ChatMode::Experimental),
            other => Err(AssistError::UnknownMode(other.to_string())),
        }
    }
}

/// One line of example conversation, `name: content`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleMessage {
    pub chatter: String,
    pub content: String,
}

impl ExampleMessage {
    /// Parse example chat lines, skipping blank lines.
    ///
    /// Content after the first colon is trimmed and stripped of double
    /// quotes. A non-blank line without a colon fails the whole parse.
    pub fn parse_lines(text: &str) -> Result<Vec<Self>, AssistError> {
        let mut messages = Vec::new();
        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (chatter, content) = line
                .split_once(':')
                .ok_or_else(|| AssistError::InvalidExample(line.to_string()))?;
            messages.push(Self {
                chatter: chatter.trim().to_string(),
                content: content.trim().replace('"', ""),
            });
        }
        Ok(messages)
    }
}

/// The uploaded persona material experimental mode is built from.
#[derive(Debug, Clone)]
pub struct PersonaBundle {
    /// Traits and speech patterns of the MND patient.
    pub mnd_persona: Value,
    /// Persona of the person close to the patient.
    pub chatter_persona: Value,
    /// The patient's previous messages, one per line.
    pub example_mnd_msgs: Vec<String>,
    /// Prior conversations between the patient and the chatter.
    pub example_chats: Vec<ExampleMessage>,
}

impl PersonaBundle {
    /// Assemble a bundle from the four uploaded files.
    pub fn from_parts(
        mnd_persona_json: &[u8],
        chatter_persona_json: &[u8],
        example_mnd_msgs_text: &str,
        example_chats_text: &str,
    ) -> Result<Self, AssistError> {
        let mnd_persona: Value = serde_json::from_slice(mnd_persona_json)
            .map_err(|e| AssistError::InvalidExample(format!("MND persona JSON: {e}")))?;
        let chatter_persona: Value = serde_json::from_slice(chatter_persona_json)
            .map_err(|e| AssistError::InvalidExample(format!("chatter persona JSON: {e}")))?;
        let example_mnd_msgs = example_mnd_msgs_text
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(str::to_string)
            .collect();
        let example_chats = ExampleMessage::parse_lines(example_chats_text)?;
        Ok(Self {
            mnd_persona,
            chatter_persona,
            example_mnd_msgs,
            example_chats,
        })
    }
}

/// Builds the system prompt for a given mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn system_prompt(
        &self,
        mode: ChatMode,
        persona: Option<&PersonaBundle>,
    ) -> Result<String, AssistError> {
        match mode {
            ChatMode::Normal => Ok("Assist the user kindly and politely.".to_string()),
            ChatMode::Experimental => {
                let bundle = persona.ok_or(AssistError::MissingPersona)?;
                let example_chats: Vec<String> = bundle
                    .example_chats
                    .iter()
                    .map(|m| format!("{}: {}", m.chatter, m.content))
                    .collect();
                Ok(format!(
                    "Create a chatbot model that mimics the communication style of an MND patient using these inputs:\n\
                     1. MND Patient Persona ({}): Traits and speech patterns of an MND patient.\n\
                     2. Relationship Context ({}): Persona of someone close to the MND patient.\n\
                     3. Historical Chat Data:\n\
                     - MND Patient's Previous Messages ({}): Past messages from the MND patient.\n\
                     - Example Chats ({}): Previous conversations between the MND patient and the other.\n\
                     The chatbot's task is to generate one-sentence, informal responses to new messages from the normal person.\n\
                     Responses should reflect the MND patient's usual language and be appropriate to their relationship with the sender.\n\
                     The output should be limited to a single sentence response without additional explanations.",
                    bundle.mnd_persona,
                    bundle.chatter_persona,
                    bundle.example_mnd_msgs.join("; "),
                    example_chats.join("; "),
                ))
            }
        }
    }
}
