use super::{Canvas, DecodedImage, FrameKind, FrameRegion, Mirror, RenderTarget};

/// A full-screen image drawn at the origin, optionally animated by frame strips.
///
/// Drawing is cached through the render target's shadow buffer: the frame is blitted
/// only when it differs from the last one drawn, otherwise the shadow is restored.
#[derive(Debug, Clone)]
pub struct Background {
    canvas: Canvas,
    kind: FrameKind,
    frame: usize,
    last_drawn: Option<usize>,
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

impl Background {
    pub fn new() -> Self {
        Self {
            canvas: Canvas::new(),
            kind: FrameKind::Whole,
            frame: 1,
            last_drawn: None,
        }
    }

    pub fn from_image(image: DecodedImage) -> Self {
        let mut background = Self::new();
        background.load_image(image);
        background
    }

    pub fn load_image(&mut self, image: DecodedImage) {
        self.canvas.load_image(image);
        self.invalidate();
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
        self.invalidate();
    }

    pub fn mirror_image(&mut self, kind: Mirror) {
        self.canvas.mirror(kind);
        self.invalidate();
    }

    pub fn resize_image(&mut self, width: usize, height: usize) {
        self.canvas.resize(width, height);
        self.invalidate();
    }

    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    pub fn set_kind(&mut self, kind: FrameKind) {
        self.kind = kind;
        self.invalidate();
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

    pub fn width(&self) -> usize {
        self.region().width
    }

    pub fn height(&self) -> usize {
        self.region().height
    }

    pub fn draw<T>(&mut self, target: &mut T)
    where
        T: RenderTarget + ?Sized,
    {
        if self.last_drawn != Some(self.frame) {
            self.slow_draw(target);
            target.save();
            self.last_drawn = Some(self.frame);
        } else {
            target.restore();
        }
    }

    fn slow_draw<T>(&self, target: &mut T)
    where
        T: RenderTarget + ?Sized,
    {
        let region = self.region();
        for x in 0..region.width {
            for y in 0..region.height {
                let offset = self.canvas.offset(region.start, x, y);
                self.canvas.draw_image_pixel(offset, x, y, target);
            }
        }
    }

    fn invalidate(&mut self) {
        self.last_drawn = None;
    }
}

#[cfg(test)]
mod tests {
    use super::Background;
    use crate::domain::{DecodedImage, FrameKind, Framebuffer, Pixel, RenderTarget};

    #[derive(Default)]
    struct CountingTarget {
        framebuffer: Framebuffer,
        draws: usize,
        saves: usize,
        restores: usize,
    }

    impl CountingTarget {
        fn new(width: usize, height: usize) -> Self {
            Self {
                framebuffer: Framebuffer::new(width, height).expect("framebuffer"),
                ..Self::default()
            }
        }
    }

    impl RenderTarget for CountingTarget {
        fn width(&self) -> usize {
            self.framebuffer.width()
        }

        fn height(&self) -> usize {
            self.framebuffer.height()
        }

        fn draw_pixel(&mut self, x: usize, y: usize, color: Pixel) {
            self.draws += 1;
            self.framebuffer.draw_pixel(x, y, color);
        }

        fn save(&mut self) {
            self.saves += 1;
            self.framebuffer.save();
        }

        fn restore(&mut self) {
            self.restores += 1;
            self.framebuffer.restore();
        }
    }

    // Two 2x2 frames side by side: red then blue.
    fn two_frame_strip() -> Background {
        let red = [0, 0, 0xFF];
        let blue = [0xFF, 0, 0];
        let row = [red, red, blue, blue].concat();
        let image = DecodedImage::from_parts(4, 2, [row.clone(), row].concat()).expect("image");
        let mut background = Background::from_image(image);
        background.set_frames(2);
        background.set_kind(FrameKind::Horizontal);
        background
    }

    #[test]
    fn first_draw_blits_and_saves() {
        let mut background = two_frame_strip();
        let mut target = CountingTarget::new(4, 4);

        background.draw(&mut target);

        assert_eq!(target.draws, 4);
        assert_eq!(target.saves, 1);
        assert_eq!(target.restores, 0);
        assert_eq!(target.framebuffer.pixel(1, 1), Some(0xF800));
        assert_eq!(target.framebuffer.pixel(2, 0), Some(0));
    }

    #[test]
    fn same_frame_restores_from_shadow() {
        let mut background = two_frame_strip();
        let mut target = CountingTarget::new(4, 4);
        background.draw(&mut target);
        target.framebuffer.draw_pixel(3, 3, Pixel::WHITE);

        background.draw(&mut target);

        assert_eq!(target.draws, 5);
        assert_eq!(target.saves, 1);
        assert_eq!(target.restores, 1);
        assert_eq!(target.framebuffer.pixel(3, 3), Some(0));
    }

    #[test]
    fn changed_frame_reblits_and_snapshots() {
        let mut background = two_frame_strip();
        let mut target = CountingTarget::new(4, 4);
        background.draw(&mut target);

        background.set_target(2);
        background.draw(&mut target);

        assert_eq!(target.draws, 8);
        assert_eq!(target.saves, 2);
        assert_eq!(target.restores, 0);
        assert_eq!(target.framebuffer.pixel(0, 0), Some(0x001F));
        assert_eq!(target.framebuffer.shadow()[0], 0x001F);
    }

    #[test]
    fn out_of_range_target_is_ignored() {
        let mut background = two_frame_strip();

        background.set_target(0);
        assert_eq!(background.frame(), 1);

        background.set_target(3);
        assert_eq!(background.frame(), 1);

        background.set_target(2);
        assert_eq!(background.frame(), 2);
    }

    #[test]
    fn vertical_kind_selects_row_band() {
        let image = DecodedImage::from_parts(1, 2, vec![0, 0, 0xFF, 0xFF, 0, 0]).expect("image");
        let mut background = Background::from_image(image);
        background.set_frames(2);
        background.set_kind(FrameKind::Vertical);
        background.set_target(2);
        let mut target = CountingTarget::new(1, 1);

        background.draw(&mut target);

        assert_eq!((background.width(), background.height()), (1, 1));
        assert_eq!(target.framebuffer.pixel(0, 0), Some(0x001F));
    }
}
