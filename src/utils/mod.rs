//! Utility functions and helpers for the relay.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and secret redaction for logged payloads.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
