use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::Framebuffer;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u16>,
}

impl FrameSnapshot {
    pub fn capture(framebuffer: &Framebuffer) -> Self {
        Self {
            width: framebuffer.width(),
            height: framebuffer.height(),
            pixels: framebuffer.as_slice().to_vec(),
        }
    }

    /// Copies the snapshot into `framebuffer`, which must have the same dimensions.
    pub fn apply(&self, framebuffer: &mut Framebuffer) -> Result<(), SnapshotError> {
        let mismatch = || SnapshotError::DimensionMismatch {
            expected: (framebuffer.width(), framebuffer.height()),
            actual: (self.width, self.height),
        };
        if self.width != framebuffer.width() || self.height != framebuffer.height() {
            return Err(mismatch());
        }
        if self.pixels.len() != framebuffer.len() {
            return Err(mismatch());
        }
        framebuffer.as_mut_slice().copy_from_slice(&self.pixels);
        Ok(())
    }
}

#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Encode(bincode::Error),
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<bincode::Error> for SnapshotError {
    fn from(err: bincode::Error) -> Self {
        Self::Encode(err)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "snapshot io error: {}", err),
            Self::Encode(err) => write!(f, "snapshot encoding error: {}", err),
            Self::DimensionMismatch { expected, actual } => write!(
                f,
                "snapshot is {}x{}, framebuffer is {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
        }
    }
}

impl std::error::Error for SnapshotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(&**err),
            Self::DimensionMismatch { .. } => None,
        }
    }
}

pub fn save_frame(path: impl AsRef<Path>, framebuffer: &Framebuffer) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let bytes = bincode::serialize(&FrameSnapshot::capture(framebuffer))?;
    std::fs::write(path, bytes)?;
    log::info!("saved frame snapshot to '{}'", path.display());
    Ok(())
}

/// Restores a saved frame. On error the framebuffer is left untouched.
pub fn load_frame(
    path: impl AsRef<Path>,
    framebuffer: &mut Framebuffer,
) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let snapshot: FrameSnapshot = bincode::deserialize(&bytes)?;
    snapshot.apply(framebuffer)?;
    log::debug!("restored frame snapshot from '{}'", path.display());
    Ok(())
}
