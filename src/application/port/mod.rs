// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! # Available Ports
//!
//! - [`media_element`]: The single playable element (decoding is external)
//! - [`host`]: Native dialogs and window full-screen control
//! - [`preferences`]: Key-value preference storage
//!
//! # Design Notes
//!
//! - Methods are synchronous; asynchronous completions come back as
//!   [`ElementEvent`](crate::video_player::ElementEvent)s delivered by the host
//! - Traits carry no windowing or decoder types

pub mod host;
pub mod media_element;
pub mod preferences;

pub use host::{FileDialogs, WindowControl};
pub use media_element::MediaElement;
pub use preferences::PreferenceStore;
