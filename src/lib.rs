//! Facade crate for the rill workspace.
//!
//! The implementation lives in the member crates; this crate reserves the
//! `rill` name and re-exports the streams crate.
#![no_std]


pub use rill_streams_rs as streams;

/// Returns the crate version string.
#[must_use]
pub const fn crate_version() -> &'static str {
  env!("CARGO_PKG_VERSION")
}

/// Returns a short note pointing at the member crates.
#[must_use]
pub const fn readiness_message() -> &'static str {
  "rill reserves this crate name; use the rill-streams-rs member crate"
}
