use super::Pixel;

/// A surface that drawables blit onto, borrowed for each draw call.
pub trait RenderTarget {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    // Out-of-bounds writes are ignored.
    fn draw_pixel(&mut self, x: usize, y: usize, color: Pixel);

    fn save(&mut self);

    fn restore(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FramebufferError {
    TooLarge { width: usize, height: usize },
    OutOfMemory { pixels: usize },
}

impl std::fmt::Display for FramebufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooLarge { width, height } => {
                write!(f, "framebuffer of {}x{} pixels is too large", width, height)
            }
            Self::OutOfMemory { pixels } => {
                write!(f, "can't allocate memory for {} framebuffer pixels", pixels)
            }
        }
    }
}

impl std::error::Error for FramebufferError {}

/// Hardware pixels for one frame plus the shadow copy used by the draw cache.
#[derive(Debug, Clone, Default)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<u16>,
    shadow: Vec<u16>,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Result<Self, FramebufferError> {
        let mut framebuffer = Self::default();
        framebuffer.resize(width, height)?;
        Ok(framebuffer)
    }

    /// Reallocates both buffers zeroed. On failure the old buffers are kept.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), FramebufferError> {
        let len = width
            .checked_mul(height)
            .ok_or(FramebufferError::TooLarge { width, height })?;
        let pixels = allocate(len)?;
        let shadow = allocate(len)?;
        self.width = width;
        self.height = height;
        self.pixels = pixels;
        self.shadow = shadow;
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u16> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.offset(x, y)])
        } else {
            None
        }
    }

    pub fn draw_pixel(&mut self, x: usize, y: usize, color: Pixel) {
        if x < self.width && y < self.height {
            let offset = self.offset(x, y);
            self.pixels[offset] = color.to_rgb565();
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn save(&mut self) {
        self.shadow.copy_from_slice(&self.pixels);
    }

    pub fn restore(&mut self) {
        self.pixels.copy_from_slice(&self.shadow);
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.pixels
    }

    pub fn as_mut_slice(&mut self) -> &mut [u16] {
        &mut self.pixels
    }

    pub fn shadow(&self) -> &[u16] {
        &self.shadow
    }

    /// The frame as native-endian bytes, ready for the device write.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        x + y * self.width
    }
}

impl RenderTarget for Framebuffer {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn draw_pixel(&mut self, x: usize, y: usize, color: Pixel) {
        Framebuffer::draw_pixel(self, x, y, color);
    }

    fn save(&mut self) {
        Framebuffer::save(self);
    }

    fn restore(&mut self) {
        Framebuffer::restore(self);
    }
}

fn allocate(len: usize) -> Result<Vec<u16>, FramebufferError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| FramebufferError::OutOfMemory { pixels: len })?;
    buffer.resize(len, 0);
    Ok(buffer)
}
