use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::error::{ObserverError, Result};

/// Rendered frame - RGBA pixels ready to present or persist
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Wrap an RGBA buffer; fails if the buffer does not match the size
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ObserverError::render(format!(
                "Invalid pixel buffer size: expected {} bytes, got {}",
                expected,
                pixels.len()
            )));
        }
        Ok(Self { width, height, pixels })
    }

    /// Expand an RGB buffer to opaque RGBA
    pub fn from_rgb(width: u32, height: u32, rgb: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(ObserverError::render(format!(
                "Invalid RGB buffer size: expected {} bytes, got {}",
                expected,
                rgb.len()
            )));
        }

        let mut pixels = Vec::with_capacity(expected / 3 * 4);
        for px in rgb.chunks_exact(3) {
            pixels.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self { width, height, pixels })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA value at (x, y)
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Encode to `path`; the format follows the extension (png, jpg)
    ///
    /// JPEG has no alpha channel, so frames are always written as RGB.
    pub fn save(&self, path: &Path) -> Result<()> {
        let image = RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| ObserverError::render("Frame buffer does not match its dimensions"))?;

        DynamicImage::ImageRgba8(image)
            .to_rgb8()
            .save(path)
            .map_err(|e| match e {
                image::ImageError::IoError(source) => ObserverError::io(path, source),
                other => ObserverError::ImageEncoding(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_expands_to_opaque_rgba() {
        let frame = Frame::from_rgb(2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();
        assert_eq!(frame.pixels(), &[255, 0, 0, 255, 0, 0, 255, 255]);
        assert_eq!(frame.pixel(1, 0), Some([0, 0, 255, 255]));
        assert_eq!(frame.pixel(2, 0), None);
    }

    #[test]
    fn rejects_wrong_buffer_size() {
        assert!(Frame::from_rgba(4, 4, vec![0; 10]).is_err());
        assert!(Frame::from_rgb(4, 4, &[0; 47]).is_err());
    }

    #[test]
    fn size_check_does_not_overflow_u32() {
        // 70000 * 70000 * 4 exceeds u32::MAX
        assert!(Frame::from_rgba(70_000, 70_000, vec![0; 4]).is_err());
        assert!(Frame::from_rgb(70_000, 70_000, &[0; 3]).is_err());
    }

    #[test]
    fn saves_png_and_jpg() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::from_rgba(8, 8, vec![200; 8 * 8 * 4]).unwrap();

        frame.save(&dir.path().join("a.png")).unwrap();
        frame.save(&dir.path().join("a.jpg")).unwrap();

        let png = image::open(dir.path().join("a.png")).unwrap();
        assert_eq!((png.width(), png.height()), (8, 8));
        assert!(dir.path().join("a.jpg").exists());
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let frame = Frame::from_rgba(1, 1, vec![0; 4]).unwrap();
        let err = frame.save(&dir.path().join("missing/a.png")).unwrap_err();
        assert!(matches!(err, ObserverError::Io { .. }));
    }
}
