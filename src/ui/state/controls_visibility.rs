// SPDX-License-Identifier: MPL-2.0
//! Control bar visibility sub-component.
//!
//! While nothing plays the bar stays visible. During playback it is shown
//! when the pointer enters the bottom hot zone and hidden again after a
//! period without pointer activity, when the pointer moves above the zone,
//! or when it leaves the surface.
//!
//! The hide timer is a deadline rather than a running timer: the host calls
//! [`State::next_deadline`] to schedule a [`Message::Tick`].

use super::OverlayTimeout;
use crate::config::CONTROLS_HOT_ZONE_HEIGHT;
use std::time::{Duration, Instant};

/// Visibility state of the control bar.
#[derive(Debug, Clone)]
pub struct State {
    visible: bool,
    playback_active: bool,
    hide_deadline: Option<Instant>,
    hide_delay: Duration,
}

/// Messages for the visibility sub-component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Message {
    /// Pointer moved over the media surface. `y` grows downwards.
    PointerMoved { y: f32, surface_height: f32 },
    /// Pointer left the media surface.
    PointerLeft,
    /// Transport switched between playing and paused/empty.
    PlaybackChanged { active: bool },
    /// Scheduled deadline check.
    Tick,
}

/// Effects produced by visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// No effect.
    None,
    /// Visibility changed.
    VisibilityChanged(bool),
}

impl Default for State {
    fn default() -> Self {
        Self::new(OverlayTimeout::default())
    }
}

impl State {
    #[must_use]
    pub fn new(hide_delay: OverlayTimeout) -> Self {
        Self {
            visible: true,
            playback_active: false,
            hide_deadline: None,
            hide_delay: hide_delay.as_duration(),
        }
    }

    /// Handle a visibility message at time `now`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message, now: Instant) -> Effect {
        match msg {
            Message::PointerMoved { y, surface_height } => {
                if !self.playback_active {
                    return Effect::None;
                }
                if is_in_hot_zone(y, surface_height) {
                    self.hide_deadline = Some(now + self.hide_delay);
                    self.set_visible(true)
                } else {
                    self.hide_deadline = None;
                    self.set_visible(false)
                }
            }
            Message::PointerLeft => {
                if !self.playback_active {
                    return Effect::None;
                }
                self.hide_deadline = None;
                self.set_visible(false)
            }
            Message::PlaybackChanged { active } => {
                self.playback_active = active;
                self.hide_deadline = None;
                if active {
                    Effect::None
                } else {
                    self.set_visible(true)
                }
            }
            Message::Tick => match self.hide_deadline {
                Some(deadline) if now >= deadline => {
                    self.hide_deadline = None;
                    self.set_visible(false)
                }
                _ => Effect::None,
            },
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true if a hide is pending.
    #[must_use]
    pub fn is_timer_armed(&self) -> bool {
        self.hide_deadline.is_some()
    }

    /// When the host should deliver the next [`Message::Tick`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.hide_deadline
    }

    /// Applies a new hide delay to subsequently armed timers.
    pub fn set_hide_delay(&mut self, delay: OverlayTimeout) {
        self.hide_delay = delay.as_duration();
    }

    fn set_visible(&mut self, visible: bool) -> Effect {
        if self.visible == visible {
            return Effect::None;
        }
        self.visible = visible;
        Effect::VisibilityChanged(visible)
    }
}

fn is_in_hot_zone(y: f32, surface_height: f32) -> bool {
    y > surface_height - CONTROLS_HOT_ZONE_HEIGHT
}
