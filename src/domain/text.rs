use super::{FrameKind, RenderTarget, Sprite};

/// Glyph count of a bitmap font strip; frame `code + 1` holds ASCII `code`.
pub const FONT_GLYPHS: usize = 128;
const FIRST_PRINTABLE: u8 = 32;

#[derive(Debug, Clone, Default)]
pub struct Text {
    x: usize,
    y: usize,
    font: Sprite,
}

impl Text {
    pub fn new(font: Sprite) -> Self {
        let mut text = Self::default();
        text.load_font(font);
        text
    }

    pub fn load_font(&mut self, mut font: Sprite) {
        font.set_frames(FONT_GLYPHS);
        font.set_kind(FrameKind::Horizontal);
        self.font = font;
    }

    pub fn font(&self) -> &Sprite {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut Sprite {
        &mut self.font
    }

    pub fn into_font(self) -> Sprite {
        self.font
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn set_position(&mut self, x: usize, y: usize) {
        self.x = x;
        self.y = y;
    }

    /// Draws `text` starting at the configured position.
    ///
    /// Control characters and bytes outside ASCII are skipped without moving the cursor.
    pub fn draw_text<T>(&mut self, text: &str, target: &mut T)
    where
        T: RenderTarget + ?Sized,
    {
        let mut cursor = self.x;
        for byte in text.bytes() {
            if !(FIRST_PRINTABLE..FONT_GLYPHS as u8).contains(&byte) {
                continue;
            }
            self.font.set_target(usize::from(byte) + 1);
            self.font.draw_at(cursor, self.y, target);
            cursor = cursor.saturating_add(self.font.width());
        }
    }
}
