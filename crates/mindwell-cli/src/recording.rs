use std::path::PathBuf;

use mindwell_core::voice::{Microphone, MicrophoneError};

/// Stands in for a live microphone by replaying a recorded file.
pub struct FileRecording {
    path: PathBuf,
    started: bool,
}

impl FileRecording {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            started: false,
        }
    }
}

impl Microphone for FileRecording {
    fn start(&mut self) -> Result<(), MicrophoneError> {
        if !self.path.is_file() {
            return Err(MicrophoneError(format!(
                "no recording at {}",
                self.path.display()
            )));
        }
        self.started = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<Vec<u8>, MicrophoneError> {
        if !std::mem::take(&mut self.started) {
            return Err(MicrophoneError("recording was never started".into()));
        }
        std::fs::read(&self.path)
            .map_err(|e| MicrophoneError(format!("{}: {}", self.path.display(), e)))
    }
}
