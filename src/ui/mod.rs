// SPDX-License-Identifier: MPL-2.0
//! Front-end state shared by every rendering host.

pub mod state;
