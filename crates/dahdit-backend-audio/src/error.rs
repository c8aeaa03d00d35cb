//! Error types for audio backend.

use dahdit_codec::BackendError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during synthesis, WAV handling or playback.
#[derive(Debug, Error)]
pub enum AudioError {
    /// A character in the Morse string is not a dot, dash, space or separator.
    #[error("unknown Morse token '{token}' at position {position}")]
    UnknownToken {
        /// The offending character.
        token: char,
        /// 0-indexed character offset in the input.
        position: usize,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid frequency.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Malformed WAV container.
    #[error("invalid WAV data: {message}")]
    InvalidWav {
        /// Error message.
        message: String,
    },

    /// The container's sample width cannot be rendered by the device.
    #[error("unsupported sample format: {width} bytes per sample")]
    UnsupportedSampleFormat {
        /// Sample width in bytes.
        width: u16,
    },

    /// No audio device or backend is available.
    #[error("no audio backend available: {reason}")]
    MissingAudioBackend {
        /// Why no backend could be opened.
        reason: String,
    },

    /// The device failed while playing.
    #[error("playback error: {message}")]
    Playback {
        /// Error message.
        message: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AudioError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an invalid WAV error.
    pub fn invalid_wav(message: impl Into<String>) -> Self {
        Self::InvalidWav {
            message: message.into(),
        }
    }

    /// Creates a missing backend error.
    pub fn missing_backend(reason: impl Into<String>) -> Self {
        Self::MissingAudioBackend {
            reason: reason.into(),
        }
    }

    /// Creates a playback error.
    pub fn playback(message: impl Into<String>) -> Self {
        Self::Playback {
            message: message.into(),
        }
    }

    /// Returns true if this error only means live playback is unavailable.
    pub fn is_missing_backend(&self) -> bool {
        matches!(self, AudioError::MissingAudioBackend { .. })
    }
}

impl BackendError for AudioError {
    fn code(&self) -> &'static str {
        match self {
            AudioError::UnknownToken { .. } => "AUDIO_001",
            AudioError::InvalidSampleRate { .. } => "AUDIO_002",
            AudioError::InvalidDuration { .. } => "AUDIO_003",
            AudioError::InvalidFrequency { .. } => "AUDIO_004",
            AudioError::InvalidParameter { .. } => "AUDIO_005",
            AudioError::InvalidWav { .. } => "AUDIO_006",
            AudioError::UnsupportedSampleFormat { .. } => "AUDIO_007",
            AudioError::MissingAudioBackend { .. } => "AUDIO_008",
            AudioError::Playback { .. } => "AUDIO_009",
            AudioError::Io(_) => "AUDIO_010",
        }
    }

    fn category(&self) -> &'static str {
        "audio"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_helper() {
        let err = AudioError::invalid_param("amplitude", "must be at most 32767");
        assert!(err.to_string().contains("amplitude"));
        assert!(err.to_string().contains("at most 32767"));
    }

    #[test]
    fn test_missing_backend_helper() {
        let err = AudioError::missing_backend("built without the `playback` feature");
        assert!(err.is_missing_backend());
        assert_eq!(err.code(), "AUDIO_008");
        assert_eq!(err.category(), "audio");
    }

    #[test]
    fn test_unsupported_format_message() {
        let err = AudioError::UnsupportedSampleFormat { width: 8 };
        assert!(err.to_string().contains("8 bytes"));
        assert!(!err.is_missing_backend());
    }
}
