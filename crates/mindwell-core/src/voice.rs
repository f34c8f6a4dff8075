use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use thiserror::Error;
use tracing::{error, info, warn};

use mindwell_client::WellnessBackend;
use mindwell_types::Language;
use mindwell_types::api::SpeechToTextRequest;

use crate::error::{Result, ValidationError};

#[derive(Debug, Error)]
#[error("{0}")]
pub struct MicrophoneError(pub String);

/// Platform audio capture. The bytes are uploaded as-is; encoding them is the
/// platform's business.
pub trait Microphone {
    fn start(&mut self) -> std::result::Result<(), MicrophoneError>;
    /// Stop capturing and release the device.
    fn stop(&mut self) -> std::result::Result<Vec<u8>, MicrophoneError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording,
}

/// Owns the microphone while a recording is running.
pub struct VoiceInput<M> {
    mic: M,
    state: RecordingState,
}

impl<M: Microphone> VoiceInput<M> {
    pub fn new(mic: M) -> Self {
        Self {
            mic,
            state: RecordingState::Idle,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    /// Start when idle; stop and hand back the audio when recording.
    pub fn toggle(&mut self) -> Result<Option<Vec<u8>>> {
        match self.state {
            RecordingState::Idle => {
                self.mic.start().inspect_err(|e| {
                    error!("Could not start recording: {}", e);
                })?;
                self.state = RecordingState::Recording;
                info!("Recording started");
                Ok(None)
            }
            RecordingState::Recording => {
                // The device is released even when stop fails.
                self.state = RecordingState::Idle;
                let audio = self.mic.stop().inspect_err(|e| {
                    error!("Could not stop recording: {}", e);
                })?;
                info!("Recording stopped, {} bytes captured", audio.len());
                Ok(Some(audio))
            }
        }
    }
}

/// Upload raw audio for transcription.
pub async fn transcribe<B: WellnessBackend>(
    backend: &B,
    audio: &[u8],
    language: Language,
) -> Result<String> {
    if audio.is_empty() {
        warn!("Empty recording, nothing to transcribe");
        return Err(ValidationError::single("audio", "No audio was recorded").into());
    }
    let req = SpeechToTextRequest {
        audio_base64: B64.encode(audio),
        language,
    };
    let resp = backend
        .speech_to_text(&req)
        .await
        .inspect_err(|e| error!("Speech-to-text failed: {}", e))?;
    Ok(resp.text.trim().to_string())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::testing::FakeBackend;

    /// Records a canned buffer; can be told to fail on start.
    #[derive(Default)]
    pub struct CannedMic {
        pub audio: Vec<u8>,
        pub refuse_start: bool,
        pub open: bool,
    }

    impl Microphone for CannedMic {
        fn start(&mut self) -> std::result::Result<(), MicrophoneError> {
            if self.refuse_start {
                return Err(MicrophoneError("permission denied".into()));
            }
            self.open = true;
            Ok(())
        }

        fn stop(&mut self) -> std::result::Result<Vec<u8>, MicrophoneError> {
            self.open = false;
            Ok(self.audio.clone())
        }
    }

    #[test]
    fn toggle_cycles_and_releases_device() {
        let mut voice = VoiceInput::new(CannedMic {
            audio: vec![1, 2, 3],
            ..Default::default()
        });
        assert_eq!(voice.toggle().unwrap(), None);
        assert!(voice.is_recording());
        assert!(voice.mic.open);

        assert_eq!(voice.toggle().unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(voice.state(), RecordingState::Idle);
        assert!(!voice.mic.open);
    }

    #[test]
    fn refused_microphone_stays_idle() {
        let mut voice = VoiceInput::new(CannedMic {
            refuse_start: true,
            ..Default::default()
        });
        let err = voice.toggle().unwrap_err();
        assert!(matches!(err, CoreError::Microphone(_)));
        assert!(!voice.is_recording());
    }

    #[tokio::test]
    async fn transcribe_uploads_base64() {
        let backend = FakeBackend::new();
        backend.state().transcript = " I feel tired ".into();
        let text = transcribe(&backend, b"RIFF", Language::Patois).await.unwrap();
        assert_eq!(text, "I feel tired");

        let state = backend.state();
        assert_eq!(state.audio_uploads[0].audio_base64, "UklGRg==");
        assert_eq!(state.audio_uploads[0].language, Language::Patois);
    }

    #[tokio::test]
    async fn empty_audio_is_not_uploaded() {
        let backend = FakeBackend::new();
        assert!(transcribe(&backend, &[], Language::En).await.is_err());
        assert!(backend.state().audio_uploads.is_empty());
    }
}
