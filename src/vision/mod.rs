//! Image handling for the upload path.
//!
//! This module validates uploaded injury photos (name, size, extension) and
//! converts accepted attachments into Gemini's `InlineData` format.
//!
//! # Submodules
//!
//! - `models`: Supported formats and upload validation rules.
//! - `translation`: Conversion of attachments into Gemini request parts.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod models;
pub mod translation;

pub use models::{validate_upload, ImageFormat, ALLOWED_EXTENSIONS};
pub use translation::{resolve_media_type, to_inline_data};
