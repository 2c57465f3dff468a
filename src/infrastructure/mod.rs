// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! Concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`native_dialogs`]: Native dialogs via `rfd` (implements [`FileDialogs`])
//! - [`preference_file`]: CBOR preference file (implements [`PreferenceStore`])
//!
//! [`FileDialogs`]: crate::application::port::FileDialogs
//! [`PreferenceStore`]: crate::application::port::PreferenceStore

pub mod native_dialogs;
pub mod preference_file;

pub use native_dialogs::NativeDialogs;
pub use preference_file::FileStore;
