use super::image::{self, BYTES_PER_PIXEL, DecodedImage, ImageError};

const HEADER_LEN: usize = 18;
const ID_LENGTH_ADDR: usize = 0;
const COLOR_MAP_TYPE_ADDR: usize = 1;
const IMAGE_TYPE_ADDR: usize = 2;
const WIDTH_ADDR: usize = 12;
const HEIGHT_ADDR: usize = 14;
const PIXEL_DEPTH_ADDR: usize = 16;
const DESCRIPTOR_ADDR: usize = 17;
const TYPE_TRUECOLOR: u8 = 2;
const TYPE_RLE_TRUECOLOR: u8 = 10;
const TRUECOLOR_DEPTH: u8 = 24;
const RAW_PACKET_LIMIT: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TgaImageType {
    Truecolor,
    RleTruecolor,
}

impl TgaImageType {
    fn from_byte(value: u8) -> Result<Self, ImageError> {
        match value {
            TYPE_TRUECOLOR => Ok(Self::Truecolor),
            TYPE_RLE_TRUECOLOR => Ok(Self::RleTruecolor),
            other => Err(ImageError::UnsupportedImageType(other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TgaHeader {
    pub id_length: u8,
    pub image_type: TgaImageType,
    pub width: u16,
    pub height: u16,
    pub pixel_depth: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.len() < HEADER_LEN {
            return Err(ImageError::TooSmall {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        if bytes[COLOR_MAP_TYPE_ADDR] != 0 {
            return Err(ImageError::UnsupportedColorMap);
        }
        let pixel_depth = bytes[PIXEL_DEPTH_ADDR];
        if pixel_depth != TRUECOLOR_DEPTH {
            return Err(ImageError::UnsupportedPixelDepth(pixel_depth));
        }

        Ok(Self {
            id_length: bytes[ID_LENGTH_ADDR],
            image_type: TgaImageType::from_byte(bytes[IMAGE_TYPE_ADDR])?,
            width: read_u16(bytes, WIDTH_ADDR),
            height: read_u16(bytes, HEIGHT_ADDR),
            pixel_depth,
            descriptor: bytes[DESCRIPTOR_ADDR],
        })
    }

    fn data_start(&self) -> usize {
        HEADER_LEN + usize::from(self.id_length)
    }
}

/// Decodes an uncompressed or run-length encoded 24-bit TGA file.
///
/// Rows are returned in file order; the origin bit of the descriptor is not applied.
pub fn decode_tga(bytes: &[u8]) -> Result<DecodedImage, ImageError> {
    let header = TgaHeader::parse(bytes)?;
    let width = usize::from(header.width);
    let height = usize::from(header.height);
    let len = image::data_len(width, height)?;
    let body = bytes
        .get(header.data_start()..)
        .ok_or(ImageError::Truncated {
            expected: header.data_start(),
            actual: bytes.len(),
        })?;

    let data = match header.image_type {
        TgaImageType::Truecolor => {
            let raw = body.get(..len).ok_or(ImageError::Truncated {
                expected: len,
                actual: body.len(),
            })?;
            let mut data = image::allocate(len)?;
            data.extend_from_slice(raw);
            data
        }
        TgaImageType::RleTruecolor => expand_rle(body, len)?,
    };

    DecodedImage::from_parts(width, height, data)
}

/// Expands TGA packets until `len` bytes are produced.
///
/// A control byte below 128 starts a raw packet of `control + 1` pixels; otherwise the
/// following pixel repeats `control - 127` times.
pub(crate) fn expand_rle(body: &[u8], len: usize) -> Result<Vec<u8>, ImageError> {
    let mut data = image::allocate(len)?;
    let mut position = 0;

    while data.len() < len {
        let truncated = ImageError::Truncated {
            expected: len,
            actual: data.len(),
        };
        let control = *body.get(position).ok_or(truncated.clone())?;
        let packet = position;
        position += 1;

        if control < RAW_PACKET_LIMIT {
            let amount = (usize::from(control) + 1) * BYTES_PER_PIXEL;
            let run = body.get(position..position + amount).ok_or(truncated)?;
            if data.len() + amount > len {
                return Err(ImageError::RunOverflow { offset: packet });
            }
            data.extend_from_slice(run);
            position += amount;
        } else {
            let repeat = usize::from(control - (RAW_PACKET_LIMIT - 1));
            let pixel = body
                .get(position..position + BYTES_PER_PIXEL)
                .ok_or(truncated)?;
            if data.len() + repeat * BYTES_PER_PIXEL > len {
                return Err(ImageError::RunOverflow { offset: packet });
            }
            for _ in 0..repeat {
                data.extend_from_slice(pixel);
            }
            position += BYTES_PER_PIXEL;
        }
    }

    Ok(data)
}

fn read_u16(bytes: &[u8], addr: usize) -> u16 {
    u16::from_le_bytes([bytes[addr], bytes[addr + 1]])
}
