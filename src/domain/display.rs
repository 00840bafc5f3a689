#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayGeometry {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
    pub x_offset: u32,
    pub y_offset: u32,
    /// Bytes per scanline, including padding.
    pub line_length: u32,
}

impl DisplayGeometry {
    pub fn bytes_per_pixel(&self) -> u64 {
        u64::from(self.bits_per_pixel / 8)
    }

    pub fn start_offset(&self) -> u64 {
        u64::from(self.x_offset) * self.bytes_per_pixel()
            + u64::from(self.y_offset) * u64::from(self.line_length)
    }
}
