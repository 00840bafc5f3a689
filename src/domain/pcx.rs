use super::image::{self, BYTES_PER_PIXEL, DecodedImage, ImageError};

const HEADER_LEN: usize = 128;
const MANUFACTURER_ADDR: usize = 0;
const VERSION_ADDR: usize = 1;
const ENCODING_ADDR: usize = 2;
const BITS_PER_PIXEL_ADDR: usize = 3;
const MIN_X_ADDR: usize = 4;
const MIN_Y_ADDR: usize = 6;
const MAX_X_ADDR: usize = 8;
const MAX_Y_ADDR: usize = 10;
const PLANES_ADDR: usize = 65;
const BYTES_PER_LINE_ADDR: usize = 66;
const RLE_ENCODING: u8 = 1;
const TRUECOLOR_PLANES: u8 = 3;
const TRUECOLOR_BITS: u8 = 8;
const RUN_MARKER: u8 = 0xC0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PcxHeader {
    pub manufacturer: u8,
    pub version: u8,
    pub encoding: u8,
    pub bits_per_pixel: u8,
    pub min_x: u16,
    pub min_y: u16,
    pub max_x: u16,
    pub max_y: u16,
    pub planes: u8,
    pub bytes_per_line: u16,
}

impl PcxHeader {
    pub fn parse(bytes: &[u8]) -> Result<Self, ImageError> {
        if bytes.len() < HEADER_LEN {
            return Err(ImageError::TooSmall {
                expected: HEADER_LEN,
                actual: bytes.len(),
            });
        }

        let header = Self {
            manufacturer: bytes[MANUFACTURER_ADDR],
            version: bytes[VERSION_ADDR],
            encoding: bytes[ENCODING_ADDR],
            bits_per_pixel: bytes[BITS_PER_PIXEL_ADDR],
            min_x: read_u16(bytes, MIN_X_ADDR),
            min_y: read_u16(bytes, MIN_Y_ADDR),
            max_x: read_u16(bytes, MAX_X_ADDR),
            max_y: read_u16(bytes, MAX_Y_ADDR),
            planes: bytes[PLANES_ADDR],
            bytes_per_line: read_u16(bytes, BYTES_PER_LINE_ADDR),
        };

        if header.encoding != RLE_ENCODING {
            return Err(ImageError::UnsupportedEncoding(header.encoding));
        }
        if header.planes != TRUECOLOR_PLANES || header.bits_per_pixel != TRUECOLOR_BITS {
            return Err(ImageError::UnsupportedPlanes {
                planes: header.planes,
                bits_per_pixel: header.bits_per_pixel,
            });
        }
        Ok(header)
    }

    pub fn width(&self) -> Result<usize, ImageError> {
        extent(self.min_x, self.max_x, self)
    }

    pub fn height(&self) -> Result<usize, ImageError> {
        extent(self.min_y, self.max_y, self)
    }

    /// Bytes in one decoded scanline across all planes.
    pub fn scanline_len(&self) -> usize {
        usize::from(self.planes) * usize::from(self.bytes_per_line)
    }
}

/// Decodes a run-length encoded, three-plane 24-bit PCX file.
pub fn decode_pcx(bytes: &[u8]) -> Result<DecodedImage, ImageError> {
    let header = PcxHeader::parse(bytes)?;
    let width = header.width()?;
    let height = header.height()?;
    let plane_stride = usize::from(header.bytes_per_line);
    if plane_stride < width {
        return Err(ImageError::InvalidLineLength {
            bytes_per_line: plane_stride,
            width,
        });
    }

    let len = image::data_len(width, height)?;
    let line = header.scanline_len();
    let planar = expand_rle(&bytes[HEADER_LEN..], line * height)?;

    let mut data = image::allocate(len)?;
    data.resize(len, 0);
    let row = width * BYTES_PER_PIXEL;
    for x in 0..width {
        for y in 0..height {
            let index = x * BYTES_PER_PIXEL + y * row;
            let position = x + y * line;
            data[index] = planar[position + 2 * plane_stride];
            data[index + 1] = planar[position + plane_stride];
            data[index + 2] = planar[position];
        }
    }

    DecodedImage::from_parts(width, height, data)
}

/// Expands the PCX byte stream into `len` bytes of planar scanlines.
///
/// A byte of 192 or more repeats the following byte `byte - 192` times; anything else is a
/// literal. Bytes past `len` are ignored.
pub(crate) fn expand_rle(body: &[u8], len: usize) -> Result<Vec<u8>, ImageError> {
    let mut data = image::allocate(len)?;
    let mut index = 0;

    while index < body.len() && data.len() < len {
        let byte = body[index];
        if byte < RUN_MARKER {
            data.push(byte);
            index += 1;
        } else {
            let value = *body.get(index + 1).ok_or(ImageError::Truncated {
                expected: len,
                actual: data.len(),
            })?;
            let repeat = usize::from(byte - RUN_MARKER).min(len - data.len());
            data.extend(std::iter::repeat_n(value, repeat));
            index += 2;
        }
    }

    if data.len() < len {
        return Err(ImageError::Truncated {
            expected: len,
            actual: data.len(),
        });
    }
    Ok(data)
}

fn extent(min: u16, max: u16, header: &PcxHeader) -> Result<usize, ImageError> {
    if max < min {
        return Err(ImageError::InvalidDimensions {
            width: usize::from(header.max_x.wrapping_sub(header.min_x)) + 1,
            height: usize::from(header.max_y.wrapping_sub(header.min_y)) + 1,
        });
    }
    Ok(usize::from(max - min) + 1)
}

fn read_u16(bytes: &[u8], addr: usize) -> u16 {
    u16::from_le_bytes([bytes[addr], bytes[addr + 1]])
}

#[cfg(test)]
mod tests {
    use super::{PcxHeader, decode_pcx, expand_rle};
    use crate::domain::{ImageError, Pixel};

    fn header(width: u16, height: u16, bytes_per_line: u16) -> Vec<u8> {
        let mut bytes = vec![0; super::HEADER_LEN];
        bytes[super::MANUFACTURER_ADDR] = 0x0A;
        bytes[super::VERSION_ADDR] = 5;
        bytes[super::ENCODING_ADDR] = 1;
        bytes[super::BITS_PER_PIXEL_ADDR] = 8;
        bytes[super::MAX_X_ADDR..super::MAX_X_ADDR + 2]
            .copy_from_slice(&(width - 1).to_le_bytes());
        bytes[super::MAX_Y_ADDR..super::MAX_Y_ADDR + 2]
            .copy_from_slice(&(height - 1).to_le_bytes());
        bytes[super::PLANES_ADDR] = 3;
        bytes[super::BYTES_PER_LINE_ADDR..super::BYTES_PER_LINE_ADDR + 2]
            .copy_from_slice(&bytes_per_line.to_le_bytes());
        bytes
    }

    #[test]
    fn parse_header_reads_bounds() {
        let mut bytes = header(1, 1, 2);
        bytes[super::MIN_X_ADDR] = 10;
        bytes[super::MAX_X_ADDR..super::MAX_X_ADDR + 2].copy_from_slice(&19u16.to_le_bytes());

        let header = PcxHeader::parse(&bytes).expect("header parse");

        assert_eq!(header.width(), Ok(10));
        assert_eq!(header.height(), Ok(1));
        assert_eq!(header.scanline_len(), 6);
    }

    #[test]
    fn rejects_uncompressed() {
        let mut bytes = header(1, 1, 1);
        bytes[super::ENCODING_ADDR] = 0;

        assert_eq!(
            PcxHeader::parse(&bytes),
            Err(ImageError::UnsupportedEncoding(0))
        );
    }

    #[test]
    fn rejects_paletted_images() {
        let mut bytes = header(1, 1, 1);
        bytes[super::PLANES_ADDR] = 1;

        assert_eq!(
            PcxHeader::parse(&bytes),
            Err(ImageError::UnsupportedPlanes {
                planes: 1,
                bits_per_pixel: 8
            })
        );
    }

    #[test]
    fn run_byte_repeats_following_value() {
        let data = expand_rle(&[0xC3, 0x42], 3).expect("expand");

        assert_eq!(data, vec![0x42, 0x42, 0x42]);
    }

    #[test]
    fn literal_bytes_copy_through() {
        let data = expand_rle(&[0x01, 0xBF, 0xC1, 0xC5], 3).expect("expand");

        assert_eq!(data, vec![0x01, 0xBF, 0xC5]);
    }

    #[test]
    fn empty_run_produces_nothing() {
        let data = expand_rle(&[0xC0, 0x11, 0x22], 1).expect("expand");

        assert_eq!(data, vec![0x22]);
    }

    #[test]
    fn short_stream_is_truncated() {
        let err = expand_rle(&[0xC2, 0x11], 3).expect_err("expected error");

        assert_eq!(
            err,
            ImageError::Truncated {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn run_crossing_the_end_is_clipped() {
        let data = expand_rle(&[0xC5, 0x07], 3).expect("expand");

        assert_eq!(data, vec![0x07, 0x07, 0x07]);
    }

    #[test]
    fn trailing_bytes_after_the_image_are_ignored() {
        let mut bytes = header(1, 1, 1);
        bytes.extend_from_slice(&[1, 2, 3]);
        // palette marker and entries some encoders append
        bytes.extend_from_slice(&[0x0C, 0xFF, 0xFF, 0xC4]);

        let image = decode_pcx(&bytes).expect("decode");

        assert_eq!(image.data(), &[3, 2, 1]);
        assert_eq!(image.pixel(0, 0), Some(Pixel::new(1, 2, 3)));
    }

    #[test]
    fn deinterleaves_planes_into_pixels() {
        let mut bytes = header(2, 1, 2);
        // red plane, green plane, blue plane
        bytes.extend_from_slice(&[10, 11, 20, 21, 30, 31]);

        let image = decode_pcx(&bytes).expect("decode");

        assert_eq!((image.width(), image.height()), (2, 1));
        assert_eq!(image.data(), &[30, 20, 10, 31, 21, 11]);
        assert_eq!(image.pixel(0, 0), Some(Pixel::new(10, 20, 30)));
    }

    #[test]
    fn plane_stride_follows_bytes_per_line() {
        let mut bytes = header(1, 2, 2);
        // each plane line is padded to two bytes
        bytes.extend_from_slice(&[1, 0, 2, 0, 3, 0]);
        bytes.extend_from_slice(&[4, 0, 5, 0, 6, 0]);

        let image = decode_pcx(&bytes).expect("decode");

        assert_eq!(image.pixel(0, 0), Some(Pixel::new(1, 2, 3)));
        assert_eq!(image.pixel(0, 1), Some(Pixel::new(4, 5, 6)));
    }

    #[test]
    fn line_shorter_than_width_is_rejected() {
        let bytes = header(4, 1, 2);

        let err = decode_pcx(&bytes).expect_err("expected error");

        assert_eq!(
            err,
            ImageError::InvalidLineLength {
                bytes_per_line: 2,
                width: 4
            }
        );
    }
}
