use super::{DecodedImage, Pixel, RenderTarget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    frames: usize,
    pixels: Vec<Pixel>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self {
            width: 0,
            height: 0,
            frames: 1,
            pixels: Vec::new(),
        }
    }

    pub fn from_image(image: DecodedImage) -> Self {
        let mut canvas = Self::new();
        canvas.load_image(image);
        canvas
    }

    /// Replaces the pixels with those of `image`, which is consumed.
    pub fn load_image(&mut self, image: DecodedImage) {
        self.width = image.width();
        self.height = image.height();
        self.pixels = image.into_pixels();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Sets the frame count. Zero is ignored so the count never drops below one.
    pub fn set_frames(&mut self, amount: usize) {
        if amount > 0 {
            self.frames = amount;
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixel(&self, offset: usize) -> Option<Pixel> {
        self.pixels.get(offset).copied()
    }

    /// Index of `(x, y)` relative to the pixel at `start`.
    pub fn offset(&self, start: usize, x: usize, y: usize) -> usize {
        start + x + y * self.width
    }

    pub fn mirror(&mut self, kind: Mirror) {
        let mut mirrored = Vec::with_capacity(self.pixels.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let source = match kind {
                    Mirror::Horizontal => self.offset(0, self.width - x - 1, y),
                    Mirror::Vertical => self.offset(0, x, self.height - y - 1),
                };
                mirrored.push(self.pixels[source]);
            }
        }
        self.pixels = mirrored;
    }

    /// Nearest-neighbour resample. Zero, overflowing or unallocatable targets leave the
    /// canvas unchanged.
    pub fn resize(&mut self, new_width: usize, new_height: usize) {
        if new_width == 0 || new_height == 0 || self.pixels.is_empty() {
            return;
        }
        let Some(len) = new_width.checked_mul(new_height) else {
            return;
        };
        let mut scaled = Vec::new();
        if scaled.try_reserve_exact(len).is_err() {
            return;
        }
        scaled.resize(len, Pixel::BLACK);
        let x_ratio = self.width as f32 / new_width as f32;
        let y_ratio = self.height as f32 / new_height as f32;
        for x in 0..new_width {
            for y in 0..new_height {
                let source_x = ((x_ratio * x as f32) as usize).min(self.width - 1);
                let source_y = ((y_ratio * y as f32) as usize).min(self.height - 1);
                scaled[x + y * new_width] = self.pixels[source_x + source_y * self.width];
            }
        }
        self.pixels = scaled;
        self.width = new_width;
        self.height = new_height;
    }

    pub(crate) fn draw_image_pixel<T>(&self, offset: usize, x: usize, y: usize, target: &mut T)
    where
        T: RenderTarget + ?Sized,
    {
        if let Some(pixel) = self.pixel(offset) {
            target.draw_pixel(x, y, pixel);
        }
    }
}
