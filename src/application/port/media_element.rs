// SPDX-License-Identifier: MPL-2.0
//! Media element port definition.
//!
//! The platform media element decodes and renders exactly one source at a
//! time. Operations are fire-and-forget; their results are reported back
//! as [`ElementEvent`](crate::video_player::ElementEvent)s tagged with the
//! [`LoadToken`] passed to [`MediaElement::load`].

use crate::media::{PlaylistEntry, RawFrame};
use crate::video_player::LoadToken;

/// Port for the playable element.
///
/// # Contract
///
/// - `load` replaces the current source and implicitly stops the previous one
/// - `play` may fail asynchronously; failure is reported as
///   `PlayRejected`, never as a panic
/// - `seek` clamps to `[0, duration]`
/// - every emitted event carries the token of the load it belongs to
pub trait MediaElement {
    /// Replaces the source.
    fn load(&mut self, entry: &PlaylistEntry, token: LoadToken);

    /// Requests playback start.
    fn play(&mut self);

    fn pause(&mut self);

    /// Seeks to `secs`, clamped to `[0, duration]`.
    fn seek(&mut self, secs: f64);

    /// Sets the output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);

    /// Current position in seconds.
    fn current_time(&self) -> f64;

    /// Duration in seconds, 0 before metadata is known.
    fn duration(&self) -> f64;

    /// The frame currently displayed, if any has been decoded.
    fn current_frame(&self) -> Option<RawFrame>;
}
