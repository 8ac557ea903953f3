// Copyright 2026 the Outcrop Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing for outcrop diagnostics.
//!
//! This crate provides [`TraceSink`](outcrop_core::trace::TraceSink)
//! implementations for development use:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.

pub mod pretty;
