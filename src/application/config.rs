use std::path::PathBuf;

use crate::infrastructure::fbdev::DEFAULT_FRAMEBUFFER_DEVICE;
use crate::infrastructure::gamepad::DEFAULT_INPUT_DEVICE;

pub const DEFAULT_ASSET_DIR: &str = "assets";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub framebuffer_device: PathBuf,
    pub input_device: PathBuf,
    pub asset_dir: PathBuf,
    pub log_file: Option<PathBuf>,
    /// Where the last frame is written on exit, if anywhere.
    pub snapshot: Option<PathBuf>,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            framebuffer_device: PathBuf::from(DEFAULT_FRAMEBUFFER_DEVICE),
            input_device: PathBuf::from(DEFAULT_INPUT_DEVICE),
            asset_dir: PathBuf::from(DEFAULT_ASSET_DIR),
            log_file: None,
            snapshot: None,
            verbose: false,
        }
    }
}

impl Config {
    pub fn asset(&self, name: &str) -> PathBuf {
        self.asset_dir.join(name)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }
}
