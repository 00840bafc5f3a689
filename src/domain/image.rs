use super::Pixel;

pub const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    TooSmall { expected: usize, actual: usize },
    UnsupportedColorMap,
    UnsupportedPixelDepth(u8),
    UnsupportedImageType(u8),
    UnsupportedEncoding(u8),
    UnsupportedPlanes { planes: u8, bits_per_pixel: u8 },
    InvalidDimensions { width: usize, height: usize },
    InvalidLineLength { bytes_per_line: usize, width: usize },
    Truncated { expected: usize, actual: usize },
    RunOverflow { offset: usize },
    OutOfMemory { bytes: usize },
}

impl std::fmt::Display for ImageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall { expected, actual } => write!(
                f,
                "header needs {} bytes but the file has {}",
                expected, actual
            ),
            Self::UnsupportedColorMap => write!(f, "color-mapped images are not supported"),
            Self::UnsupportedPixelDepth(depth) => {
                write!(f, "pixel depth {} is not supported, expected 24", depth)
            }
            Self::UnsupportedImageType(kind) => write!(f, "image type {} is not supported", kind),
            Self::UnsupportedEncoding(encoding) => {
                write!(f, "encoding {} is not supported", encoding)
            }
            Self::UnsupportedPlanes {
                planes,
                bits_per_pixel,
            } => write!(
                f,
                "{} planes of {} bits is not 24-bit truecolor",
                planes, bits_per_pixel
            ),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid image dimensions {}x{}", width, height)
            }
            Self::InvalidLineLength {
                bytes_per_line,
                width,
            } => write!(
                f,
                "plane line of {} bytes is shorter than image width {}",
                bytes_per_line, width
            ),
            Self::Truncated { expected, actual } => write!(
                f,
                "pixel data truncated: expected {} bytes, got {}",
                expected, actual
            ),
            Self::RunOverflow { offset } => {
                write!(f, "run at byte {} overflows the image", offset)
            }
            Self::OutOfMemory { bytes } => {
                write!(f, "can't allocate {} bytes for image buffer", bytes)
            }
        }
    }
}

impl std::error::Error for ImageError {}

/// Pixels produced by a decoder, stored as blue, green, red byte triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl DecodedImage {
    pub fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ImageError> {
        let expected = data_len(width, height)?;
        if data.len() != expected {
            return Err(ImageError::Truncated {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (x + y * self.width) * BYTES_PER_PIXEL;
        let bytes = self.data.get(index..index + BYTES_PER_PIXEL)?;
        Some(Pixel::from_bgr([bytes[0], bytes[1], bytes[2]]))
    }

    /// Moves the pixels out, leaving this image empty with zero dimensions.
    pub fn take(&mut self) -> DecodedImage {
        std::mem::take(self)
    }

    pub fn into_pixels(self) -> Vec<Pixel> {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|bytes| Pixel::from_bgr([bytes[0], bytes[1], bytes[2]]))
            .collect()
    }
}

/// Byte length of a `width` x `height` truecolor image. Zero-sized images are rejected.
pub(crate) fn data_len(width: usize, height: usize) -> Result<usize, ImageError> {
    if width == 0 || height == 0 {
        return Err(ImageError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or(ImageError::InvalidDimensions { width, height })
}

pub(crate) fn allocate(len: usize) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| ImageError::OutOfMemory { bytes: len })?;
    Ok(buffer)
}
