// SPDX-License-Identifier: MPL-2.0
//! `reel_player` is the core of a lightweight desktop media player.
//!
//! It keeps a playlist of local audio and video files, drives a platform
//! media element through a narrow port, remembers volume and the resume
//! position across sessions, and captures PNG screenshots of video frames.
//! Host shells provide the element, dialogs and window; everything else is
//! plain state that can be tested without a GUI.

#![doc(html_root_url = "https://docs.rs/reel_player/0.1.0")]

pub mod app;
pub mod application;
pub mod config;
pub mod diagnostics;
pub mod directory_scanner;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;
pub mod video_player;

#[cfg(test)]
pub(crate) mod test_utils;
