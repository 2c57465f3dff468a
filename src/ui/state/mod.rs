// SPDX-License-Identifier: MPL-2.0
//! UI state that does not depend on a rendering surface.

pub mod controls_visibility;
pub mod overlay_timeout;

pub use overlay_timeout::OverlayTimeout;
