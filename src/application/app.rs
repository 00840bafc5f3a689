use std::path::Path;

use crate::domain::{Background, DecodedImage, FrameKind, Sprite, Text, Tileset, TilesetError};
use crate::infrastructure::image_loader::{self, ImageLoadError};

#[derive(Debug)]
pub enum AssetError {
    Load(ImageLoadError),
    Grid(TilesetError),
}

impl From<ImageLoadError> for AssetError {
    fn from(err: ImageLoadError) -> Self {
        Self::Load(err)
    }
}

impl From<TilesetError> for AssetError {
    fn from(err: TilesetError) -> Self {
        Self::Grid(err)
    }
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Load(err) => write!(f, "{}", err),
            Self::Grid(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Load(err) => Some(err),
            Self::Grid(err) => Some(err),
        }
    }
}

pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage, ImageLoadError> {
    image_loader::load_image(path)
}

pub fn load_background(path: impl AsRef<Path>) -> Result<Background, ImageLoadError> {
    Ok(Background::from_image(load_image(path)?))
}

pub fn load_sprite(
    path: impl AsRef<Path>,
    frames: usize,
    kind: FrameKind,
) -> Result<Sprite, ImageLoadError> {
    let mut sprite = Sprite::from_image(load_image(path)?);
    sprite.set_frames(frames);
    sprite.set_kind(kind);
    Ok(sprite)
}

pub fn load_font(path: impl AsRef<Path>) -> Result<Text, ImageLoadError> {
    Ok(Text::new(Sprite::from_image(load_image(path)?)))
}

pub fn load_tileset(
    path: impl AsRef<Path>,
    rows: usize,
    columns: usize,
) -> Result<Tileset, AssetError> {
    let image = load_image(path)?;
    Ok(Tileset::new(image, rows, columns)?)
}
