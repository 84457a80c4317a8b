//! Handwriting recognizer: extract text from an uploaded image.
//!
//! Uploads are checked against a MIME allow-list and a 10 MB ceiling before
//! anything is encoded or sent. The image travels base64-encoded as an
//! inline attachment after a fixed instruction.

use std::path::Path;

use super::catalog::ToolKind;
use super::{Task, ToolError};
use crate::llm::InlineImage;
use crate::parse::{self, ParseError};

pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/gif"];

const INSTRUCTION: &str =
    "Extract all text from this image, including any handwritten text. Provide only the extracted text and nothing else.";

/// MIME type implied by a file extension, if it is one we accept.
#[must_use]
pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

fn check_type(mime_type: &str) -> Result<(), ToolError> {
    if ALLOWED_MIME_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(ToolError::Invalid("Invalid file type. Please upload a PNG, JPG, or GIF image.".into()))
    }
}

fn check_size(len: u64) -> Result<(), ToolError> {
    if len > MAX_IMAGE_BYTES {
        Err(ToolError::Invalid("File size exceeds 10MB. Please upload a smaller image.".into()))
    } else {
        Ok(())
    }
}

/// An image that passed the type and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload(InlineImage);

impl ImageUpload {
    /// # Errors
    ///
    /// [`ToolError::Invalid`] for a disallowed type or an oversized payload.
    pub fn new(mime_type: &str, bytes: Vec<u8>) -> Result<Self, ToolError> {
        check_type(mime_type)?;
        check_size(bytes.len() as u64)?;
        Ok(Self(InlineImage { mime_type: mime_type.to_string(), bytes }))
    }

    /// Read an image file, checking type and size before loading it.
    ///
    /// # Errors
    ///
    /// [`ToolError::Invalid`] for a bad extension, an oversized file, or a
    /// file that cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, ToolError> {
        let mime_type = mime_for_path(path).unwrap_or("application/octet-stream");
        check_type(mime_type)?;

        let unreadable = |e: std::io::Error| ToolError::Invalid(format!("Could not read {}: {e}", path.display()));
        let meta = tokio::fs::metadata(path).await.map_err(unreadable)?;
        check_size(meta.len())?;

        let bytes = tokio::fs::read(path).await.map_err(unreadable)?;
        Self::new(mime_type, bytes)
    }

    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.0.mime_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.bytes.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct HandwritingTask {
    pub image: Option<ImageUpload>,
}

impl Task for HandwritingTask {
    type Output = String;

    const KIND: ToolKind = ToolKind::Handwriting;

    fn check_input(&self) -> Result<(), ToolError> {
        match &self.image {
            Some(_) => Ok(()),
            None => Err(ToolError::Invalid("Please select an image file first.".into())),
        }
    }

    fn prompt(&self) -> String {
        INSTRUCTION.to_string()
    }

    fn image(&self) -> Option<&InlineImage> {
        self.image.as_ref().map(|upload| &upload.0)
    }

    fn parse(raw: &str) -> Result<String, ParseError> {
        parse::parse_text(raw)
    }
}

#[cfg(test)]
#[path = "handwriting_test.rs"]
mod tests;
