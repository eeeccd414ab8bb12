//! Speech-to-text boundary for voice input.
//!
//! The recognition service is an external collaborator; this crate defines
//! the audio types handed to it, a [`Transcriber`] trait at the boundary,
//! and a mock implementation for tests. Recognized text feeds the message
//! draft in the view layer; nothing in the core depends on the service
//! being available.

use thiserror::Error;

use tether_core::config::SpeechConfig;
use tether_core::error::TetherError;

// =============================================================================
// Errors
// =============================================================================

/// Errors from the speech-to-text boundary.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("audio clip is empty")]
    EmptyAudio,

    #[error("audio clip of {size} bytes exceeds the {limit} byte limit")]
    AudioTooLarge { size: usize, limit: usize },

    /// The service received the audio but could not understand it.
    #[error("speech could not be understood")]
    Unintelligible,

    /// The service was unreachable or unresponsive.
    #[error("speech service unavailable: {0}")]
    ServiceUnreachable(String),
}

impl From<SpeechError> for TetherError {
    fn from(err: SpeechError) -> Self {
        TetherError::Speech(err.to_string())
    }
}

// =============================================================================
// Audio types
// =============================================================================

/// Where an audio clip came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Uploaded from the user's device.
    Local,
    /// Fetched from a user-supplied URL.
    Url(String),
}

/// A bounded audio clip ready for transcription.
#[derive(Debug, Clone)]
pub struct AudioClip {
    source: AudioSource,
    bytes: Vec<u8>,
}

impl AudioClip {
    /// Accept a clip, enforcing the configured size limit.
    pub fn new(
        source: AudioSource,
        bytes: Vec<u8>,
        config: &SpeechConfig,
    ) -> Result<Self, SpeechError> {
        if bytes.is_empty() {
            return Err(SpeechError::EmptyAudio);
        }
        if bytes.len() > config.max_audio_bytes {
            return Err(SpeechError::AudioTooLarge {
                size: bytes.len(),
                limit: config.max_audio_bytes,
            });
        }
        Ok(Self { source, bytes })
    }

    pub fn source(&self) -> &AudioSource {
        &self.source
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// =============================================================================
// Trait
// =============================================================================

/// Service turning an audio clip into recognized text.
pub trait Transcriber {
    fn transcribe(&self, clip: &AudioClip) -> Result<String, SpeechError>;
}

// =============================================================================
// Mock implementation
// =============================================================================

/// Mock transcriber with a canned outcome, for tests and development.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    outcome: Result<String, MockFailure>,
}

#[derive(Debug, Clone)]
enum MockFailure {
    Unintelligible,
    Unreachable(String),
}

impl MockTranscriber {
    /// Always recognize the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
        }
    }

    /// Simulate audio the service cannot understand.
    pub fn unintelligible() -> Self {
        Self {
            outcome: Err(MockFailure::Unintelligible),
        }
    }

    /// Simulate an unreachable service.
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(MockFailure::Unreachable(message.into())),
        }
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, clip: &AudioClip) -> Result<String, SpeechError> {
        tracing::debug!(bytes = clip.bytes().len(), "Mock transcription requested");
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(MockFailure::Unintelligible) => Err(SpeechError::Unintelligible),
            Err(MockFailure::Unreachable(message)) => {
                Err(SpeechError::ServiceUnreachable(message.clone()))
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SpeechConfig {
        SpeechConfig::default()
    }

    fn clip(bytes: Vec<u8>) -> AudioClip {
        AudioClip::new(AudioSource::Local, bytes, &config()).unwrap()
    }

    #[test]
    fn test_clip_rejects_empty_audio() {
        let err = AudioClip::new(AudioSource::Local, Vec::new(), &config()).unwrap_err();
        assert!(matches!(err, SpeechError::EmptyAudio));
    }

    #[test]
    fn test_clip_enforces_size_limit() {
        let small_limit = SpeechConfig {
            enabled: true,
            max_audio_bytes: 4,
        };
        let err = AudioClip::new(AudioSource::Local, vec![0u8; 5], &small_limit).unwrap_err();
        assert!(matches!(
            err,
            SpeechError::AudioTooLarge { size: 5, limit: 4 }
        ));
    }

    #[test]
    fn test_clip_keeps_its_source() {
        let url = AudioSource::Url("https://example.com/clip.wav".to_string());
        let clip = AudioClip::new(url.clone(), vec![1, 2, 3], &config()).unwrap();
        assert_eq!(clip.source(), &url);
        assert_eq!(clip.bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_mock_recognizes_text() {
        let transcriber = MockTranscriber::new("hello from voice");
        assert_eq!(
            transcriber.transcribe(&clip(vec![0u8; 16])).unwrap(),
            "hello from voice"
        );
    }

    #[test]
    fn test_mock_unintelligible() {
        let transcriber = MockTranscriber::unintelligible();
        let err = transcriber.transcribe(&clip(vec![0u8; 16])).unwrap_err();
        assert!(matches!(err, SpeechError::Unintelligible));
    }

    #[test]
    fn test_mock_unreachable_carries_message() {
        let transcriber = MockTranscriber::unreachable("connection refused");
        let err = transcriber.transcribe(&clip(vec![0u8; 16])).unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_errors_fold_into_tether_error() {
        let err: TetherError = SpeechError::Unintelligible.into();
        assert!(matches!(err, TetherError::Speech(_)));
    }
}
