// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    Encode(String),
    Media(MediaError),
}

/// Media errors reported by a [`MediaElement`](crate::application::port::MediaElement).
///
/// None of these are fatal: the controller logs them and reconciles the
/// transport state to "paused".
#[derive(Debug, Clone, PartialEq)]
pub enum MediaError {
    /// `play()` was refused (autoplay policy, permission issue).
    PlaybackRejected(String),

    /// The container or codec is not supported by the platform element.
    UnsupportedFormat,

    /// Decoding failed while loading or during playback.
    DecodingFailed(String),

    /// Generic error with raw message
    Other(String),
}

impl MediaError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            MediaError::PlaybackRejected(_) => "error-media-playback-rejected",
            MediaError::UnsupportedFormat => "error-media-unsupported-format",
            MediaError::DecodingFailed(_) => "error-media-decoding-failed",
            MediaError::Other(_) => "error-media-general",
        }
    }

    /// Classifies a raw error message coming from a media element.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("notallowed")
            || msg_lower.contains("not allowed")
            || msg_lower.contains("autoplay")
            || msg_lower.contains("permission")
            || msg_lower.contains("interrupted")
        {
            return MediaError::PlaybackRejected(msg.to_string());
        }

        if msg_lower.contains("notsupported")
            || msg_lower.contains("not supported")
            || msg_lower.contains("no supported source")
            || msg_lower.contains("unsupported")
        {
            return MediaError::UnsupportedFormat;
        }

        if msg_lower.contains("decode")
            || msg_lower.contains("corrupt")
            || msg_lower.contains("codec")
        {
            return MediaError::DecodingFailed(msg.to_string());
        }

        MediaError::Other(msg.to_string())
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::PlaybackRejected(msg) => write!(f, "Playback rejected: {}", msg),
            MediaError::UnsupportedFormat => write!(f, "Unsupported media format"),
            MediaError::DecodingFailed(msg) => write!(f, "Decoding failed: {}", msg),
            MediaError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Encode(e) => write!(f, "Encode Error: {}", e),
            Error::Media(e) => write!(f, "Media Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<MediaError> for Error {
    fn from(err: MediaError) -> Self {
        Error::Media(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Encode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
