//! RGBA pixel buffer for raster figure output.
//!
//! Rows are padded to a 64-byte stride; [`Framebuffer::to_compact_pixels`]
//! strips the padding for encoders that expect tightly packed rows.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Row alignment in bytes.
const ROW_ALIGNMENT: usize = 64;

/// Largest width or height accepted by [`Framebuffer::new`].
pub const MAX_SIDE: u32 = 16_384;

/// Row-major RGBA framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    /// RGBA pixels, `stride` bytes per row.
    pixels: Vec<u8>,
    stride: usize,
}

impl Framebuffer {
    /// Create a new framebuffer with the given dimensions, filled with transparent black.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero or above [`MAX_SIDE`].
    ///
    /// # Example
    ///
    /// ```
    /// use calib_plot::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 776).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 776);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_SIDE || height > MAX_SIDE {
            return Err(Error::InvalidDimensions { width, height });
        }

        let row_bytes = (width as usize) * 4;
        let stride = (row_bytes + ROW_ALIGNMENT - 1) & !(ROW_ALIGNMENT - 1);

        Ok(Self { width, height, pixels: vec![0; stride * (height as usize)], stride })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the stride (row width in bytes, including padding).
    #[must_use]
    pub const fn stride(&self) -> usize {
        self.stride
    }

    /// Get a row of pixels without padding.
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = (y as usize) * self.stride;
        Some(&self.pixels[start..start + (self.width as usize) * 4])
    }

    /// Clear the framebuffer to a solid color.
    pub fn clear(&mut self, color: Rgba) {
        self.fill_rect(0, 0, self.width, self.height, color);
    }

    /// Fill a rectangular region with a solid color.
    ///
    /// Coordinates are clamped to framebuffer bounds.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgba) {
        let x1 = x.min(self.width);
        let y1 = y.min(self.height);
        let x2 = x.saturating_add(w).min(self.width);
        let y2 = y.saturating_add(h).min(self.height);

        if x1 >= x2 || y1 >= y2 {
            return;
        }

        let rgba = color.to_array();
        let span = (x2 - x1) as usize * 4;

        for row_y in y1..y2 {
            let start = (row_y as usize) * self.stride + (x1 as usize) * 4;
            for chunk in self.pixels[start..start + span].chunks_exact_mut(4) {
                chunk.copy_from_slice(&rgba);
            }
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let idx = self.pixel_index(x, y);
        Some(Rgba::from_array([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]))
    }

    /// Set the color at a specific pixel coordinate.
    ///
    /// Does nothing if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }

        let idx = self.pixel_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Number of pixels exactly equal to `color`.
    #[must_use]
    pub fn count_pixels(&self, color: Rgba) -> usize {
        let rgba = color.to_array();
        (0..self.height)
            .filter_map(|y| self.row(y))
            .map(|row| row.chunks_exact(4).filter(|px| px[..] == rgba[..]).count())
            .sum()
    }

    /// Pixel data without stride padding, as PNG expects.
    #[must_use]
    pub fn to_compact_pixels(&self) -> Vec<u8> {
        let row_bytes = (self.width as usize) * 4;
        if self.stride == row_bytes {
            return self.pixels.clone();
        }

        let mut compact = Vec::with_capacity(row_bytes * (self.height as usize));
        for y in 0..self.height {
            let start = (y as usize) * self.stride;
            compact.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        compact
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * self.stride + (x as usize) * 4
    }
}
