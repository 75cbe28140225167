//! CapturedFrame - camera output
//!
//! Raw pixel buffer for one capture, in the camera's native channel order.

use std::borrow::Cow;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::ContractError;

/// Channel order of a packed 3-channel 8-bit buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelLayout {
    /// R, G, B (display standard)
    Rgb8,
    /// B, G, R (what most camera stacks hand out for "RGB888")
    #[default]
    Bgr8,
}

impl PixelLayout {
    /// Bytes per pixel
    pub const fn channels(self) -> usize {
        3
    }
}

/// One acquired frame
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Image width
    pub width: u32,

    /// Image height
    pub height: u32,

    /// Native channel order
    pub layout: PixelLayout,

    /// Packed pixel data, row-major, no padding
    pub data: Bytes,
}

impl CapturedFrame {
    /// Byte length implied by width, height and layout
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * self.layout.channels()
    }

    /// Check that the buffer matches the declared geometry
    pub fn validate(&self) -> Result<(), ContractError> {
        if self.width == 0 || self.height == 0 {
            return Err(ContractError::InvalidFrame {
                message: format!("empty geometry {}x{}", self.width, self.height),
            });
        }
        if self.data.len() != self.expected_len() {
            return Err(ContractError::InvalidFrame {
                message: format!(
                    "{}x{} {:?} needs {} bytes, got {}",
                    self.width,
                    self.height,
                    self.layout,
                    self.expected_len(),
                    self.data.len()
                ),
            });
        }
        Ok(())
    }

    /// Pixel data in RGB order.
    ///
    /// Borrows when the frame is already RGB; otherwise swaps the R and B
    /// channels of every pixel into a new buffer.
    pub fn to_rgb(&self) -> Cow<'_, [u8]> {
        match self.layout {
            PixelLayout::Rgb8 => Cow::Borrowed(&self.data[..]),
            PixelLayout::Bgr8 => {
                let mut rgb = self.data.to_vec();
                for px in rgb.chunks_exact_mut(3) {
                    px.swap(0, 2);
                }
                Cow::Owned(rgb)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(layout: PixelLayout, data: Vec<u8>) -> CapturedFrame {
        CapturedFrame {
            width: 2,
            height: 1,
            layout,
            data: Bytes::from(data),
        }
    }

    #[test]
    fn test_to_rgb_borrows_rgb() {
        let f = frame(PixelLayout::Rgb8, vec![1, 2, 3, 4, 5, 6]);
        assert!(matches!(f.to_rgb(), Cow::Borrowed(_)));
        assert_eq!(&*f.to_rgb(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_to_rgb_swaps_bgr() {
        let f = frame(PixelLayout::Bgr8, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(&*f.to_rgb(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_channel_swap_is_reversible() {
        let original = vec![10, 20, 30, 40, 50, 60];
        let once = frame(PixelLayout::Bgr8, original.clone()).to_rgb().into_owned();
        let twice = frame(PixelLayout::Bgr8, once).to_rgb().into_owned();
        assert_eq!(twice, original);
    }

    #[test]
    fn test_validate_rejects_short_buffer() {
        let f = frame(PixelLayout::Rgb8, vec![0; 5]);
        let err = f.validate().unwrap_err();
        assert!(err.to_string().contains("needs 6 bytes"));
    }

    #[test]
    fn test_validate_rejects_empty_geometry() {
        let f = CapturedFrame {
            width: 0,
            height: 240,
            layout: PixelLayout::Rgb8,
            data: Bytes::new(),
        };
        assert!(f.validate().is_err());
    }
}
