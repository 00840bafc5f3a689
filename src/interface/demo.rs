use std::time::{Duration, Instant};

use anyhow::Context;

use crate::application::{Config, Screen, app};
use crate::domain::{
    Background, Button, FrameKind, KeyState, Mirror, RenderTarget, Sprite, Text,
};
use crate::infrastructure::gamepad::Gamepad;
use crate::infrastructure::image_loader::ImageLoadError;

const SHIP_FRAMES: usize = 2;
const SHIP_STEP: i64 = 4;
const ANIMATION_INTERVAL: Duration = Duration::from_secs(1);

/// Space scene with a full-screen background, a ship steered with the
/// d-pad and the current frame rate in the corner.
#[derive(Debug)]
pub struct Demo {
    background: Background,
    ship: Sprite,
    text: Text,
    screen_width: i64,
    screen_height: i64,
    x: i64,
    y: i64,
    frame: usize,
    last_toggle: Instant,
}

impl Demo {
    pub fn load(config: &Config, width: usize, height: usize) -> Result<Self, ImageLoadError> {
        let background = app::load_background(config.asset("space.tga"))?;
        let ship = app::load_sprite(config.asset("ship.tga"), SHIP_FRAMES, FrameKind::Horizontal)?;
        let text = app::load_font(config.asset("font.tga"))?;
        Ok(Self::new(background, ship, text, width, height, Instant::now()))
    }

    pub fn new(
        mut background: Background,
        mut ship: Sprite,
        mut text: Text,
        width: usize,
        height: usize,
        now: Instant,
    ) -> Self {
        background.resize_image(width, height);
        background.set_kind(FrameKind::Whole);
        ship.set_frames(SHIP_FRAMES);
        ship.set_kind(FrameKind::Horizontal);
        let glyph_width = text.font().width();
        let glyph_height = text.font().height();
        text.set_position(glyph_width, glyph_height);

        let screen_width = i64::try_from(width).unwrap_or(i64::MAX);
        let screen_height = i64::try_from(height).unwrap_or(i64::MAX);
        Self {
            background,
            ship,
            text,
            screen_width,
            screen_height,
            x: screen_width / 2,
            y: screen_height / 2,
            frame: 1,
            last_toggle: now,
        }
    }

    pub fn position(&self) -> (i64, i64) {
        (self.x, self.y)
    }

    pub fn ship(&self) -> &Sprite {
        &self.ship
    }

    /// Handles one poll of input and draws one frame. Returns `false` once X is pressed.
    pub fn step<T>(&mut self, input: KeyState, fps: u32, target: &mut T) -> bool
    where
        T: RenderTarget + ?Sized,
    {
        self.step_at(input, fps, Instant::now(), target)
    }

    pub fn step_at<T>(&mut self, input: KeyState, fps: u32, now: Instant, target: &mut T) -> bool
    where
        T: RenderTarget + ?Sized,
    {
        match input.pressed() {
            Some(Button::X) => return false,
            Some(Button::A) => self.ship.mirror_image(Mirror::Horizontal),
            Some(Button::B) => self.ship.mirror_image(Mirror::Vertical),
            _ => {}
        }
        match input.held() {
            Some(Button::Up) => self.y -= SHIP_STEP,
            Some(Button::Down) => self.y += SHIP_STEP,
            Some(Button::Left) => self.x -= SHIP_STEP,
            Some(Button::Right) => self.x += SHIP_STEP,
            _ => {}
        }
        if self.x <= 0 || self.x >= self.screen_width {
            self.x = self.screen_width / 2;
        }
        if self.y <= 0 || self.y >= self.screen_height {
            self.y = self.screen_height / 2;
        }

        self.background.draw(target);
        self.text.draw_text(&fps.to_string(), target);
        self.ship.set_target(self.frame);
        // Both coordinates are inside (0, screen size) here.
        self.ship.set_position(self.x as usize, self.y as usize);
        self.ship.draw(target);

        if now.duration_since(self.last_toggle) >= ANIMATION_INTERVAL {
            self.frame = if self.frame >= SHIP_FRAMES { 1 } else { self.frame + 1 };
            self.last_toggle = now;
        }
        true
    }
}

pub fn run(config: &Config) -> anyhow::Result<()> {
    let mut screen = Screen::open(&config.framebuffer_device).with_context(|| {
        format!(
            "failed to open display '{}'",
            config.framebuffer_device.display()
        )
    })?;
    let mut gamepad = Gamepad::open(&config.input_device).with_context(|| {
        format!(
            "failed to open input device '{}'",
            config.input_device.display()
        )
    })?;
    let mut demo = Demo::load(config, screen.width(), screen.height())
        .with_context(|| format!("failed to load assets from '{}'", config.asset_dir.display()))?;

    log::info!("demo started at {}x{}", screen.width(), screen.height());
    screen.clear();
    loop {
        screen.update()?;
        gamepad.update()?;
        let fps = screen.fps();
        if !demo.step(gamepad.state(), fps, &mut screen) {
            break;
        }
    }
    log::info!("demo finished at {} fps", screen.fps());

    save_snapshot(config, &screen)
}

#[cfg(feature = "snapshot")]
fn save_snapshot(config: &Config, screen: &Screen) -> anyhow::Result<()> {
    if let Some(path) = &config.snapshot {
        crate::infrastructure::snapshot::save_frame(path, screen.framebuffer())
            .with_context(|| format!("failed to save snapshot '{}'", path.display()))?;
    }
    Ok(())
}

#[cfg(not(feature = "snapshot"))]
fn save_snapshot(config: &Config, _screen: &Screen) -> anyhow::Result<()> {
    if config.snapshot.is_some() {
        log::warn!("built without snapshot support; skipping snapshot");
    }
    Ok(())
}
