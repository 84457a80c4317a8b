//! Voice tool: dictation and read-aloud over injected speech capabilities.
//!
//! DESIGN
//! ======
//! Speech capture and synthesis belong to the host. Each is a small trait
//! that hands back an event channel; [`Dictation`] and [`ReadAloud`] are
//! plain state holders driven by those events, so the lifecycle quirks of
//! the host API never leak into widget state. Neither side talks to the AI
//! client.

pub mod console;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::error::ErrorCode;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeechError {
    #[error("speech capability is not available")]
    Unsupported,

    #[error("recording is already in progress")]
    AlreadyRecording,

    #[error("nothing to read aloud")]
    EmptyText,

    #[error("speech device error: {0}")]
    Device(String),
}

impl ErrorCode for SpeechError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Unsupported => "E_SPEECH_UNSUPPORTED",
            Self::AlreadyRecording => "E_ALREADY_RECORDING",
            Self::EmptyText => "E_EMPTY_TEXT",
            Self::Device(_) => "E_SPEECH_DEVICE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Device(_))
    }
}

/// Something the host should surface as a blocking alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    MicrophoneDenied,
    RecognitionNetwork,
    PlaybackFailed,
}

impl Alert {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::MicrophoneDenied => "Microphone access denied. Please allow microphone permissions for this feature.",
            Self::RecognitionNetwork => "Network error during speech recognition. Please check your connection.",
            Self::PlaybackFailed => {
                "Error reading text aloud. It might be too long or an issue with the voice service."
            }
        }
    }
}

// =============================================================================
// RECOGNITION
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionErrorKind {
    NotAllowed,
    NoSpeech,
    Network,
    Other(String),
}

impl RecognitionErrorKind {
    /// Map a host error code such as `not-allowed` or `no-speech`.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" => Self::NotAllowed,
            "no-speech" => Self::NoSpeech,
            "network" => Self::Network,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Result { transcript: String, is_final: bool },
    Error(RecognitionErrorKind),
    End,
}

/// Host speech-to-text capability. Continuous, with interim results.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin capturing. Events arrive on the returned channel; a closed
    /// channel counts as [`SpeechEvent::End`].
    ///
    /// # Errors
    ///
    /// [`SpeechError`] when capture cannot start.
    fn start(&self) -> Result<mpsc::Receiver<SpeechEvent>, SpeechError>;

    fn stop(&self);
}

/// Dictate tab state: recording flag plus the running transcript.
#[derive(Debug, Default)]
pub struct Dictation {
    recording: bool,
    finals: String,
    interim: String,
}

impl Dictation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Final results so far followed by the latest interim result.
    #[must_use]
    pub fn transcript(&self) -> String {
        format!("{}{}", self.finals, self.interim)
    }

    /// Manual edit of the transcript box.
    pub fn set_transcript(&mut self, text: impl Into<String>) {
        self.finals = text.into();
        self.interim.clear();
    }

    /// Clear the previous transcript and start a new recording.
    ///
    /// # Errors
    ///
    /// [`SpeechError::AlreadyRecording`], or the recognizer's start error.
    pub fn start(&mut self, recognizer: &dyn SpeechRecognizer) -> Result<mpsc::Receiver<SpeechEvent>, SpeechError> {
        if self.recording {
            return Err(SpeechError::AlreadyRecording);
        }
        self.finals.clear();
        self.interim.clear();

        let events = recognizer.start()?;
        self.recording = true;
        debug!("dictation: started");
        Ok(events)
    }

    pub fn stop(&mut self, recognizer: &dyn SpeechRecognizer) {
        if self.recording {
            self.recording = false;
            recognizer.stop();
            debug!("dictation: stopped");
        }
    }

    /// Apply one recognizer event.
    pub fn handle(&mut self, event: SpeechEvent) -> Option<Alert> {
        match event {
            SpeechEvent::Result { transcript, is_final: true } => {
                self.finals.push_str(&transcript);
                self.interim.clear();
                None
            }
            SpeechEvent::Result { transcript, is_final: false } => {
                self.interim = transcript;
                None
            }
            SpeechEvent::End => {
                self.recording = false;
                None
            }
            SpeechEvent::Error(kind) => {
                self.recording = false;
                warn!(?kind, "dictation: recognition error");
                match kind {
                    RecognitionErrorKind::NotAllowed => Some(Alert::MicrophoneDenied),
                    RecognitionErrorKind::Network => Some(Alert::RecognitionNetwork),
                    RecognitionErrorKind::NoSpeech | RecognitionErrorKind::Other(_) => None,
                }
            }
        }
    }

    /// Drain events until recording stops. Returns the alert that ended it,
    /// if any.
    pub async fn listen(&mut self, events: &mut mpsc::Receiver<SpeechEvent>) -> Option<Alert> {
        while self.recording {
            let event = events.recv().await.unwrap_or(SpeechEvent::End);
            if let Some(alert) = self.handle(event) {
                return Some(alert);
            }
        }
        None
    }
}

// =============================================================================
// SYNTHESIS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UtteranceEvent {
    Start,
    End,
    Error(String),
}

/// Host text-to-speech capability.
pub trait SpeechSynthesizer: Send + Sync {
    /// Queue `text` for playback.
    ///
    /// # Errors
    ///
    /// [`SpeechError`] when playback cannot start.
    fn speak(&self, text: &str) -> Result<mpsc::Receiver<UtteranceEvent>, SpeechError>;

    fn cancel(&self);

    fn is_speaking(&self) -> bool;
}

pub const DEFAULT_READ_TEXT: &str =
    "Hello, welcome to EduLearn AI. We are excited to help you on your learning journey.";

/// Read Aloud tab state.
#[derive(Debug, Default)]
pub struct ReadAloud {
    speaking: bool,
}

impl ReadAloud {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// Speak `text`, cancelling whatever is playing first.
    ///
    /// # Errors
    ///
    /// [`SpeechError::EmptyText`] for blank text, or the synthesizer's error.
    pub fn read(
        &mut self,
        synth: &dyn SpeechSynthesizer,
        text: &str,
    ) -> Result<mpsc::Receiver<UtteranceEvent>, SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }
        if synth.is_speaking() {
            synth.cancel();
        }
        synth.speak(text)
    }

    pub fn stop(&mut self, synth: &dyn SpeechSynthesizer) {
        if synth.is_speaking() {
            synth.cancel();
        }
        self.speaking = false;
    }

    pub fn handle(&mut self, event: UtteranceEvent) -> Option<Alert> {
        match event {
            UtteranceEvent::Start => {
                self.speaking = true;
                None
            }
            UtteranceEvent::End => {
                self.speaking = false;
                None
            }
            UtteranceEvent::Error(reason) => {
                self.speaking = false;
                warn!(%reason, "read aloud: synthesis error");
                Some(Alert::PlaybackFailed)
            }
        }
    }

    /// Drain utterance events until playback ends.
    pub async fn wait(&mut self, events: &mut mpsc::Receiver<UtteranceEvent>) -> Option<Alert> {
        while let Some(event) = events.recv().await {
            let done = !matches!(event, UtteranceEvent::Start);
            if let Some(alert) = self.handle(event) {
                return Some(alert);
            }
            if done {
                break;
            }
        }
        self.speaking = false;
        None
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
