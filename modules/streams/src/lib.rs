//! Lazy single-pass stream pipeline with a per-element error channel.
//!
//! A transformation stage may fail for an individual element without
//! aborting the whole stream; later stages inspect, recover from, or drop
//! the recorded failures, and terminal consumers decide whether unresolved
//! failures are tolerated or surfaced.
#![no_std]

extern crate alloc;

/// Core pipeline implementation (alloc-only).
pub mod core;
