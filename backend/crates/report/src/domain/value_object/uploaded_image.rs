//! Uploaded Image
//!
//! A photo received with a new report. Only JPEG and PNG files are
//! accepted; the check runs on the file name before anything leaves the
//! process.

use std::fmt;

use crate::error::ReportError;

/// Accepted image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Resolve from a file extension (`jpg`, `jpeg` or `png`)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    pub const fn mime(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

pub struct UploadedImage {
    file_name: String,
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl UploadedImage {
    /// The extension is whatever follows the last `.` of `file_name`.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ReportError> {
        let file_name = file_name.into();
        let ext = file_name.rsplit('.').next().unwrap_or_default();
        let format = ImageFormat::from_extension(ext)
            .ok_or_else(|| ReportError::UnsupportedFormat(ext.to_string()))?;

        Ok(Self {
            file_name,
            format,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_parts(self) -> (String, ImageFormat, Vec<u8>) {
        (self.file_name, self.format, self.bytes)
    }
}

impl fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedImage")
            .field("file_name", &self.file_name)
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}
