use super::{Canvas, CollisionBox, DecodedImage, FrameKind, FrameRegion, Mirror, Pixel, RenderTarget};

#[derive(Debug, Clone)]
pub struct Sprite {
    canvas: Canvas,
    kind: FrameKind,
    frame: usize,
    x: usize,
    y: usize,
    transparent: bool,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Sprite {
    pub fn new() -> Self {
        Self {
            canvas: Canvas::new(),
            kind: FrameKind::Whole,
            frame: 1,
            x: 0,
            y: 0,
            transparent: true,
        }
    }

    pub fn from_image(image: DecodedImage) -> Self {
        let mut sprite = Self::new();
        sprite.load_image(image);
        sprite
    }

    pub fn load_image(&mut self, image: DecodedImage) {
        self.canvas.load_image(image);
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn image_width(&self) -> usize {
        self.canvas.width()
    }

    pub fn image_height(&self) -> usize {
        self.canvas.height()
    }

    pub fn frames(&self) -> usize {
        self.canvas.frames()
    }

    pub fn set_frames(&mut self, amount: usize) {
        self.canvas.set_frames(amount);
        if self.frame > self.canvas.frames() {
            self.frame = 1;
        }
    }

    pub fn mirror_image(&mut self, kind: Mirror) {
        self.canvas.mirror(kind);
    }

    pub fn resize_image(&mut self, width: usize, height: usize) {
        self.canvas.resize(width, height);
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    /// Enables color keying against the first pixel of the current frame.
    pub fn set_transparent(&mut self, enabled: bool) {
        self.transparent = enabled;
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn set_x(&mut self, x: usize) {
        self.x = x;
    }

    pub fn set_y(&mut self, y: usize) {
        self.y = y;
    }

    pub fn set_position(&mut self, x: usize, y: usize) {
        self.x = x;
        self.y = y;
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: FrameKind) {
        self.kind = kind;
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Selects the 1-based frame to draw. Out-of-range frames are ignored.
    pub fn set_target(&mut self, frame: usize) {
        if frame > 0 && frame <= self.canvas.frames() {
            self.frame = frame;
        }
    }

    pub fn region(&self) -> FrameRegion {
        self.kind.region(&self.canvas, self.frame)
    }

    /// Width of one frame.
    pub fn width(&self) -> usize {
        self.region().width
    }

    /// Height of one frame.
    pub fn height(&self) -> usize {
        self.region().height
    }

    pub fn collision_box(&self) -> CollisionBox {
        let region = self.region();
        CollisionBox::new(self.x, self.y, region.width, region.height)
    }

    pub fn draw<T>(&self, target: &mut T)
    where
        T: RenderTarget + ?Sized,
    {
        let region = self.region();
        let Some(key) = self.canvas.pixel(region.start) else {
            return;
        };
        for sprite_x in 0..region.width {
            for sprite_y in 0..region.height {
                let offset = self.canvas.offset(region.start, sprite_x, sprite_y);
                let Some(pixel) = self.canvas.pixel(offset) else {
                    continue;
                };
                if self.transparent && !differs(key, pixel) {
                    continue;
                }
                target.draw_pixel(
                    self.x.saturating_add(sprite_x),
                    self.y.saturating_add(sprite_y),
                    pixel,
                );
            }
        }
    }

    pub fn draw_at<T>(&mut self, x: usize, y: usize, target: &mut T)
    where
        T: RenderTarget + ?Sized,
    {
        self.set_position(x, y);
        self.draw(target);
    }
}

// Red and green decide first; blue only breaks the tie.
fn differs(first: Pixel, second: Pixel) -> bool {
    if first.red != second.red || first.green != second.green {
        true
    } else {
        first.blue != second.blue
    }
}

#[cfg(test)]
mod tests {
    use super::{Sprite, differs};
    use crate::domain::{CollisionBox, DecodedImage, FrameKind, Framebuffer, Pixel};

    const KEY: [u8; 3] = [0xFF, 0x00, 0xFF];
    const RED: [u8; 3] = [0x00, 0x00, 0xFF];
    const GREEN: [u8; 3] = [0x00, 0xFF, 0x00];

    fn image(width: usize, height: usize, pixels: &[[u8; 3]]) -> DecodedImage {
        DecodedImage::from_parts(width, height, pixels.concat()).expect("image")
    }

    #[test]
    fn differs_checks_blue_after_red_and_green() {
        assert!(differs(Pixel::new(1, 2, 3), Pixel::new(9, 2, 3)));
        assert!(differs(Pixel::new(1, 2, 3), Pixel::new(1, 9, 3)));
        assert!(differs(Pixel::new(1, 2, 3), Pixel::new(1, 2, 9)));
        assert!(!differs(Pixel::new(1, 2, 3), Pixel::new(1, 2, 3)));
    }

    #[test]
    fn transparent_sprite_skips_key_color() {
        let sprite = {
            let mut sprite = Sprite::from_image(image(2, 2, &[KEY, RED, GREEN, KEY]));
            sprite.set_position(1, 1);
            sprite
        };
        let mut framebuffer = Framebuffer::new(4, 4).expect("framebuffer");
        framebuffer.as_mut_slice().fill(0x1234);

        sprite.draw(&mut framebuffer);

        assert_eq!(framebuffer.pixel(1, 1), Some(0x1234));
        assert_eq!(framebuffer.pixel(2, 1), Some(0xF800));
        assert_eq!(framebuffer.pixel(1, 2), Some(0x07E0));
        assert_eq!(framebuffer.pixel(2, 2), Some(0x1234));
    }

    #[test]
    fn opaque_sprite_draws_every_pixel() {
        let mut sprite = Sprite::from_image(image(2, 1, &[KEY, RED]));
        sprite.set_transparent(false);
        let mut framebuffer = Framebuffer::new(2, 1).expect("framebuffer");

        sprite.draw(&mut framebuffer);

        assert_eq!(framebuffer.pixel(0, 0), Some(0xF81F));
        assert_eq!(framebuffer.pixel(1, 0), Some(0xF800));
    }

    #[test]
    fn color_key_comes_from_current_frame() {
        let mut sprite = Sprite::from_image(image(4, 1, &[KEY, RED, GREEN, RED]));
        sprite.set_frames(2);
        sprite.set_kind(FrameKind::Horizontal);
        sprite.set_target(2);
        let mut framebuffer = Framebuffer::new(2, 1).expect("framebuffer");

        sprite.draw(&mut framebuffer);

        assert_eq!(framebuffer.pixel(0, 0), Some(0));
        assert_eq!(framebuffer.pixel(1, 0), Some(0xF800));
    }

    #[test]
    fn vertical_strip_draws_selected_band() {
        let mut sprite = Sprite::from_image(image(1, 3, &[RED, GREEN, KEY]));
        sprite.set_transparent(false);
        sprite.set_frames(3);
        sprite.set_kind(FrameKind::Vertical);
        sprite.set_target(2);
        let mut framebuffer = Framebuffer::new(1, 1).expect("framebuffer");

        sprite.draw(&mut framebuffer);

        assert_eq!((sprite.width(), sprite.height()), (1, 1));
        assert_eq!(framebuffer.pixel(0, 0), Some(0x07E0));
    }

    #[test]
    fn drawing_past_the_edge_is_clipped() {
        let mut sprite = Sprite::from_image(image(2, 2, &[RED, RED, RED, RED]));
        sprite.set_transparent(false);
        let mut framebuffer = Framebuffer::new(2, 2).expect("framebuffer");

        sprite.draw_at(1, 1, &mut framebuffer);

        assert_eq!((sprite.x(), sprite.y()), (1, 1));
        assert_eq!(framebuffer.pixel(0, 0), Some(0));
        assert_eq!(framebuffer.pixel(1, 1), Some(0xF800));
    }

    #[test]
    fn set_target_ignores_out_of_range() {
        let mut sprite = Sprite::from_image(image(2, 1, &[RED, RED]));
        sprite.set_frames(2);

        sprite.set_target(3);
        assert_eq!(sprite.frame(), 1);

        sprite.set_target(2);
        assert_eq!(sprite.frame(), 2);

        sprite.set_frames(1);
        assert_eq!(sprite.frame(), 1);
    }

    #[test]
    fn collision_box_uses_frame_size() {
        let mut sprite = Sprite::from_image(image(4, 2, &[RED; 8]));
        sprite.set_frames(2);
        sprite.set_kind(FrameKind::Horizontal);
        sprite.set_position(10, 20);

        assert_eq!(sprite.collision_box(), CollisionBox::new(10, 20, 2, 2));
    }

    #[test]
    fn clone_is_independent() {
        let original = Sprite::from_image(image(1, 1, &[RED]));
        let mut copy = original.clone();

        copy.set_position(5, 5);
        copy.set_transparent(false);

        assert_eq!((original.x(), original.y()), (0, 0));
        assert!(original.is_transparent());
        assert_eq!(copy.canvas(), original.canvas());
    }
}
