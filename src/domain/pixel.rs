#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Pixel {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(0xFF, 0xFF, 0xFF);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a pixel from a blue, green, red byte triple as stored by the decoders.
    pub const fn from_bgr(bytes: [u8; 3]) -> Self {
        Self::new(bytes[2], bytes[1], bytes[0])
    }

    pub const fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }

    pub fn to_rgb565(self) -> u16 {
        pack_rgb565(self.red, self.green, self.blue)
    }
}

pub fn pack_rgb565(red: u8, green: u8, blue: u8) -> u16 {
    (u16::from(blue) >> 3) | ((u16::from(green) >> 2) << 5) | ((u16::from(red) >> 3) << 11)
}

#[cfg(test)]
mod tests {
    use super::{Pixel, pack_rgb565};
    use proptest::prelude::*;

    #[test]
    fn pack_extremes() {
        assert_eq!(pack_rgb565(0, 0, 0), 0x0000);
        assert_eq!(pack_rgb565(0xFF, 0xFF, 0xFF), 0xFFFF);
        assert_eq!(pack_rgb565(0xFF, 0, 0), 0xF800);
        assert_eq!(pack_rgb565(0, 0xFF, 0), 0x07E0);
        assert_eq!(pack_rgb565(0, 0, 0xFF), 0x001F);
    }

    #[test]
    fn pack_drops_low_bits() {
        assert_eq!(pack_rgb565(0x07, 0x03, 0x07), 0);
        assert_eq!(pack_rgb565(0x08, 0x04, 0x08), 0x0821);
    }

    #[test]
    fn bgr_order_round_trips_through_pixel() {
        let pixel = Pixel::from_bgr([1, 2, 3]);

        assert_eq!(pixel, Pixel::new(3, 2, 1));
        assert_eq!(pixel.to_bgr(), [1, 2, 3]);
    }

    proptest! {
        #[test]
        fn prop_pack_matches_bit_layout(red in any::<u8>(), green in any::<u8>(), blue in any::<u8>()) {
            let expected = ((blue as u16) >> 3)
                | (((green as u16) >> 2) << 5)
                | (((red as u16) >> 3) << 11);

            prop_assert_eq!(pack_rgb565(red, green, blue), expected);
            prop_assert_eq!(Pixel::new(red, green, blue).to_rgb565(), expected);
        }
    }
}
