use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage, imageops};

use crate::consts::{CLEAR, DEFAULT_HEIGHT, DEFAULT_WIDTH};

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("failed to write canvas snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}

/// An RGBA drawing surface.
///
/// Width and height are the surface's pixel dimensions. Changing either one
/// reallocates the buffer and clears every pixel to [`CLEAR`].
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Canvas {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { pixels: RgbaImage::from_pixel(width, height, Rgba(CLEAR)) }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Assign new dimensions. Always clears, even when the size is unchanged.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::from_pixel(width, height, Rgba(CLEAR));
    }

    /// Resize only when `width`/`height` differ from the current size.
    ///
    /// Returns `true` if the surface was reallocated.
    pub fn resize_to(&mut self, width: u32, height: u32) -> bool {
        if self.dimensions() == (width, height) {
            return false;
        }
        self.set_size(width, height);
        true
    }

    /// Composite `bitmap` with its top-left corner at (`x`, `y`).
    ///
    /// Parts of the bitmap that fall outside the surface are clipped.
    pub fn draw_image(&mut self, bitmap: &RgbaImage, x: i64, y: i64) {
        imageops::overlay(&mut self.pixels, bitmap, x, y);
    }

    /// Pixel at (`x`, `y`), or `None` when out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    /// Write the current contents to `path` as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Snapshot`] if the file cannot be created or the
    /// image cannot be encoded.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), SurfaceError> {
        self.pixels.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}
