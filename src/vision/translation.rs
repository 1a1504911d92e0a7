// Vision translation logic
// Author: kelexine (https://github.com/kelexine)

use super::models::ImageFormat;
use crate::models::gemini::InlineData;
use crate::models::Attachment;
use base64::Engine;

/// Pick the media type sent to Gemini.
///
/// The client's declared content type wins; browsers that send nothing useful
/// fall back to the type implied by the file extension.
pub fn resolve_media_type(declared: Option<&str>, format: ImageFormat) -> String {
    match declared.map(str::trim) {
        Some(mt) if !mt.is_empty() && !mt.eq_ignore_ascii_case("application/octet-stream") => {
            mt.to_string()
        }
        _ => format.mime_type().to_string(),
    }
}

/// Translate an attachment to Gemini InlineData
pub fn to_inline_data(attachment: &Attachment) -> InlineData {
    // Gemini expects bare base64, no "data:image/png;base64," prefix
    InlineData {
        mime_type: attachment.media_type.clone(),
        data: base64::engine::general_purpose::STANDARD.encode(&attachment.bytes),
    }
}
