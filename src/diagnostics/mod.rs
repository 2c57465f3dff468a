// SPDX-License-Identifier: MPL-2.0
//! Diagnostics module for collecting and exporting session activity.
//!
//! Every user control action, media failure and refused operation is
//! captured as a [`DiagnosticEvent`], kept in a memory-bounded circular
//! buffer and exportable as a JSON report.
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticsCollector`]: Owns the buffer and drains the event channel
//! - [`DiagnosticsHandle`]: Cheap-to-clone, non-blocking event sender

mod buffer;
mod collector;
mod events;
mod report;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{AppStateEvent, DiagnosticEvent, DiagnosticEventKind, UserAction};
pub use report::{DiagnosticReport, ReportMetadata, SerializableEvent};
