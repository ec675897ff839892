//! In-memory RGB framebuffer.
//!
//! Backs the binary's terminal preview and the rasterization tests. Pixels are
//! stored row-major, one [`Rgb888`] each; writes outside the buffer are dropped.

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb888,
    prelude::{DrawTarget, OriginDimensions, Pixel, RgbColor, Size},
};

/// Default surface size in pixels.
pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 300;

/// Largest width or height a framebuffer will allocate.
pub const MAX_DIMENSION: u32 = 2048;

/// Luminance ramp for the terminal preview, dark to light.
const ASCII_RAMP: &[u8] = b" .:-=+*%@";

/// Row-major RGB pixel buffer.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb888>,
}

impl Framebuffer {
    /// A black buffer. Each dimension is capped at [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.min(MAX_DIMENSION);
        let height = height.min(MAX_DIMENSION);
        Self {
            width,
            height,
            pixels: vec![Rgb888::BLACK; width as usize * height as usize],
        }
    }

    pub fn fill_all(&mut self, color: Rgb888) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb888> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgb888) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Number of pixels exactly equal to `color`.
    pub fn count(&self, color: Rgb888) -> usize {
        self.pixels.iter().filter(|&&p| p == color).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width as usize)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height as usize)?;
        Some(y * self.width as usize + x)
    }

    /// Downsample to `columns` characters per line for a terminal preview.
    ///
    /// Each character covers a cell twice as tall as it is wide. Cells where
    /// red dominates print as `#`, so lit LED bars and numerals stand out from
    /// the gray gradient; everything else maps through a luminance ramp.
    pub fn to_ascii(&self, columns: u32) -> String {
        let columns = columns.clamp(1, self.width.max(1));
        let cell_w = (self.width / columns).max(1);
        let cell_h = cell_w * 2;
        let rows = self.height / cell_h;

        let mut out = String::with_capacity(((columns + 1) * rows) as usize);
        for row in 0..rows {
            for col in 0..columns {
                out.push(self.cell_char(col * cell_w, row * cell_h, cell_w, cell_h));
            }
            out.push('\n');
        }
        out
    }

    fn cell_char(&self, x0: u32, y0: u32, w: u32, h: u32) -> char {
        let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
        for y in y0..(y0 + h).min(self.height) {
            for x in x0..(x0 + w).min(self.width) {
                let p = self.pixels[y as usize * self.width as usize + x as usize];
                r += u32::from(p.r());
                g += u32::from(p.g());
                b += u32::from(p.b());
                n += 1;
            }
        }
        if n == 0 {
            return ' ';
        }
        let (r, g, b) = (r / n, g / n, b / n);
        if r > 96 && r > 2 * g.max(b) {
            return '#';
        }
        let luma = (r * 299 + g * 587 + b * 114) / 1000;
        let last = ASCII_RAMP.len() as u32 - 1;
        ASCII_RAMP[(luma * last / 255) as usize] as char
    }
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_all(color);
        Ok(())
    }
}
