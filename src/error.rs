/// Unified error type for the sound bridge.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("unknown sound \"{0}\"")]
    UnknownSound(String),
    #[error("failed to load sound from {path}: {reason}")]
    Load { path: String, reason: String },
    #[error("audio backend error: {0}")]
    Playback(String),
    #[error("malformed sound event: {0}")]
    MalformedEvent(#[from] serde_json::Error),
}

pub type AudioResult<T> = Result<T, AudioError>;
