// SPDX-License-Identifier: MPL-2.0
//! Playlist and playback control.
//!
//! Decoding is delegated to the platform media element behind the
//! [`MediaElement`](crate::application::port::MediaElement) port. This module
//! keeps the playlist, transport, volume and resume state, and drives the
//! element through [`PlaybackController`].

mod command;
mod controller;
mod event;
mod state;
pub mod time_format;
mod volume;

pub use command::{Command, LoadToken};
pub use controller::PlaybackController;
pub use event::{ElementEvent, ElementEventKind};
pub use state::{Outcome, PlaybackState, ResumeBookmark, Transport};
pub use time_format::format_time;
pub use volume::Volume;
