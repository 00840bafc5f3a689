use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::domain::{FpsCounter, Framebuffer, FramebufferError, Pixel, RenderTarget};
use crate::infrastructure::fbdev::{DeviceError, FbDevice};

#[derive(Debug)]
pub enum ScreenError {
    Device(DeviceError),
    Framebuffer(FramebufferError),
}

impl From<DeviceError> for ScreenError {
    fn from(err: DeviceError) -> Self {
        Self::Device(err)
    }
}

impl From<FramebufferError> for ScreenError {
    fn from(err: FramebufferError) -> Self {
        Self::Framebuffer(err)
    }
}

impl std::fmt::Display for ScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Device(err) => write!(f, "{}", err),
            Self::Framebuffer(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for ScreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Device(err) => Some(err),
            Self::Framebuffer(err) => Some(err),
        }
    }
}

#[derive(Debug)]
pub struct Screen<W = File> {
    device: FbDevice<W>,
    framebuffer: Framebuffer,
    fps: FpsCounter,
}

impl Screen<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScreenError> {
        Self::with_device(FbDevice::open(path)?)
    }
}

impl<W: Write + Seek> Screen<W> {
    pub fn with_device(device: FbDevice<W>) -> Result<Self, ScreenError> {
        let framebuffer = device.create_framebuffer()?;
        Ok(Self {
            device,
            framebuffer,
            fps: FpsCounter::new(),
        })
    }

    /// Blits the frame to the device and counts it.
    pub fn update(&mut self) -> Result<(), DeviceError> {
        self.device.refresh(&self.framebuffer)?;
        self.fps.tick();
        Ok(())
    }

    pub fn fps(&self) -> u32 {
        self.fps.fps()
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn device(&self) -> &FbDevice<W> {
        &self.device
    }

    pub fn into_device(self) -> FbDevice<W> {
        self.device
    }
}

impl<W> RenderTarget for Screen<W> {
    fn width(&self) -> usize {
        self.framebuffer.width()
    }

    fn height(&self) -> usize {
        self.framebuffer.height()
    }

    fn draw_pixel(&mut self, x: usize, y: usize, color: Pixel) {
        self.framebuffer.draw_pixel(x, y, color);
    }

    fn save(&mut self) {
        self.framebuffer.save();
    }

    fn restore(&mut self) {
        self.framebuffer.restore();
    }
}
