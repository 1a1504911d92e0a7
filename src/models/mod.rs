//! Data models for the relay.
//!
//! This module contains the type definitions used by:
//! - The upstream Google Gemini REST API (`gemini`)
//! - The per-request model input built by the intake stage (`request`)
//! - The structured injury report returned to clients (`report`)

// Author: kelexine (https://github.com/kelexine)

pub mod gemini;
pub mod report;
pub mod request;

pub use gemini::{Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part};
pub use report::{InjuryReport, Severity};
pub use request::{Attachment, ModelRequest};
