// SPDX-License-Identifier: MPL-2.0
//! Application layer - boundaries to the host environment.
//!
//! - [`port`]: Trait definitions implemented by the host shell, the platform
//!   media element and preference storage
//!
//! # Dependency Rule
//!
//! - The playback core depends on these traits only
//! - Infrastructure implements them (`rfd` dialogs, CBOR preference file)
//! - Tests implement them with in-memory fakes

pub mod port;
