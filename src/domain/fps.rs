use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(1);

/// Counts frames over one-second windows.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    window_start: Option<Instant>,
    frames: u32,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        if self.frames == 0 {
            self.window_start = Some(now);
        }
        self.frames = self.frames.saturating_add(1);
        let elapsed = self
            .window_start
            .is_some_and(|start| now.duration_since(start) >= WINDOW);
        if elapsed {
            self.fps = self.frames;
            self.frames = 0;
        }
    }
}
