// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons.
//!
//! Re-exports the `approx` assertion macro, which handles floating-point
//! precision where `assert_eq!` cannot.

pub use approx::assert_abs_diff_eq;
