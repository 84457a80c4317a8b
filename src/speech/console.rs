//! Terminal stand-ins for the speech capabilities.
//!
//! Dictation reads stdin: each non-empty line is one final result, an empty
//! line or EOF ends the recording. Read aloud prints the utterance.

use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{RecognitionErrorKind, SpeechError, SpeechEvent, SpeechRecognizer, SpeechSynthesizer, UtteranceEvent};

const EVENT_BUFFER: usize = 32;

#[derive(Default)]
pub struct ConsoleRecognizer {
    reader: Mutex<Option<JoinHandle<()>>>,
}

impl ConsoleRecognizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpeechRecognizer for ConsoleRecognizer {
    fn start(&self) -> Result<mpsc::Receiver<SpeechEvent>, SpeechError> {
        let mut reader = self.reader.lock().map_err(|_| SpeechError::Device("recognizer lock poisoned".into()))?;
        if reader.as_ref().is_some_and(|h| !h.is_finished()) {
            return Err(SpeechError::AlreadyRecording);
        }

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);
        *reader = Some(tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                let event = match lines.next_line().await {
                    Ok(Some(line)) if !line.trim().is_empty() => {
                        SpeechEvent::Result { transcript: format!("{} ", line.trim()), is_final: true }
                    }
                    Ok(_) => SpeechEvent::End,
                    Err(e) => SpeechEvent::Error(RecognitionErrorKind::Other(e.to_string())),
                };
                let last = !matches!(event, SpeechEvent::Result { .. });
                if tx.send(event).await.is_err() || last {
                    break;
                }
            }
        }));
        Ok(rx)
    }

    fn stop(&self) {
        if let Ok(mut reader) = self.reader.lock()
            && let Some(handle) = reader.take()
        {
            handle.abort();
        }
    }
}

#[derive(Default)]
pub struct ConsoleSynthesizer {
    speaking: AtomicBool,
}

impl ConsoleSynthesizer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&self, text: &str) -> Result<mpsc::Receiver<UtteranceEvent>, SpeechError> {
        let (tx, rx) = mpsc::channel(2);
        self.speaking.store(true, Ordering::SeqCst);
        let _ = tx.try_send(UtteranceEvent::Start);

        let mut out = std::io::stdout().lock();
        let end = match writeln!(out, "[read aloud] {text}").and_then(|()| out.flush()) {
            Ok(()) => UtteranceEvent::End,
            Err(e) => UtteranceEvent::Error(e.to_string()),
        };
        self.speaking.store(false, Ordering::SeqCst);
        let _ = tx.try_send(end);
        Ok(rx)
    }

    fn cancel(&self) {
        self.speaking.store(false, Ordering::SeqCst);
    }

    fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}
