// SPDX-License-Identifier: MPL-2.0
//! Screenshot capture of the current video frame.
//!
//! A capture encodes exactly one decoded frame, at native resolution, into an
//! in-memory PNG. The buffer lives until the next capture replaces it and is
//! only written to disk on an explicit download.

use super::MediaKind;
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use image_rs::{ImageBuffer, ImageFormat, Rgba};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A decoded frame as exposed by the media element.
///
/// Uses `Arc<Vec<u8>>` so the element can hand out its current frame
/// without copying the pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFrame {
    /// RGBA pixel data.
    pub rgba_data: Arc<Vec<u8>>,
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
}

impl RawFrame {
    #[must_use]
    pub fn new(rgba_data: Arc<Vec<u8>>, width: u32, height: u32) -> Self {
        Self {
            rgba_data,
            width,
            height,
        }
    }

    /// Returns true if the frame has decoded dimensions.
    #[must_use]
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// An encoded screenshot held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct Screenshot {
    png: Vec<u8>,
    width: u32,
    height: u32,
    captured_at: DateTime<Utc>,
}

impl Screenshot {
    /// Captures `frame` if the current entry is a video with decoded dimensions.
    ///
    /// Returns `Ok(None)` when capture is refused (audio entry, no frame, or a
    /// zero-sized frame).
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel buffer does not match the frame size or
    /// PNG encoding fails.
    pub fn capture(kind: MediaKind, frame: Option<&RawFrame>) -> Result<Option<Self>> {
        Self::capture_at(kind, frame, Utc::now())
    }

    /// Same as [`Screenshot::capture`] with an explicit capture time.
    pub fn capture_at(
        kind: MediaKind,
        frame: Option<&RawFrame>,
        captured_at: DateTime<Utc>,
    ) -> Result<Option<Self>> {
        if kind == MediaKind::Audio {
            return Ok(None);
        }
        let Some(frame) = frame.filter(|f| f.has_dimensions()) else {
            return Ok(None);
        };

        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(frame.width, frame.height, (*frame.rgba_data).clone())
                .ok_or_else(|| {
                    Error::Encode("Frame data does not match its dimensions".to_string())
                })?;

        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(Some(Self {
            png,
            width: frame.width,
            height: frame.height,
            captured_at,
        }))
    }

    /// Encoded PNG bytes, suitable for a preview thumbnail.
    #[must_use]
    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Download filename: `screenshot-<epoch-ms>.png`.
    #[must_use]
    pub fn default_filename(&self) -> String {
        format!("screenshot-{}.png", self.captured_at.timestamp_millis())
    }

    /// Writes the screenshot into `dir` under [`Screenshot::default_filename`].
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or the file written.
    pub fn download_to<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.default_filename());
        std::fs::write(&path, &self.png)?;
        Ok(path)
    }
}
