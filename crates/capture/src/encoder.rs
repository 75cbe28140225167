//! Compressed copy for publication

use bytes::Bytes;
use contracts::CapturedFrame;
use image::{ExtendedColorType, ImageEncoder};

use crate::error::{CaptureError, Result};

/// Turns a captured frame into the bytes held for publication
pub trait ArtifactEncoder: Send {
    /// MIME type of the produced bytes
    fn content_type(&self) -> &'static str;

    fn encode(&self, frame: &CapturedFrame) -> Result<Bytes>;
}

/// Baseline JPEG
#[derive(Debug, Clone, Copy)]
pub struct JpegEncoder {
    quality: u8,
}

impl JpegEncoder {
    /// `quality` is clamped to 1..=100
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }
}

impl Default for JpegEncoder {
    fn default() -> Self {
        Self::new(95)
    }
}

impl ArtifactEncoder for JpegEncoder {
    fn content_type(&self) -> &'static str {
        "image/jpeg"
    }

    fn encode(&self, frame: &CapturedFrame) -> Result<Bytes> {
        // The codec panics on a length mismatch
        frame
            .validate()
            .map_err(|e| CaptureError::encode(e.to_string()))?;

        let rgb = frame.to_rgb();
        let mut buf = Vec::with_capacity(frame.expected_len() / 4);
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.quality)
            .write_image(&rgb, frame.width, frame.height, ExtendedColorType::Rgb8)
            .map_err(|e| CaptureError::encode(e.to_string()))?;

        Ok(Bytes::from(buf))
    }
}
