use std::path::{Path, PathBuf};

use crate::domain::{DecodedImage, ImageError, decode_pcx, decode_tga};

#[derive(Debug)]
pub enum ImageLoadError {
    Io(std::io::Error),
    Format(ImageError),
    UnknownExtension(PathBuf),
}

impl From<std::io::Error> for ImageLoadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ImageError> for ImageLoadError {
    fn from(err: ImageError) -> Self {
        Self::Format(err)
    }
}

impl std::fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "can't open image file: {}", err),
            Self::Format(err) => write!(f, "invalid image format: {}", err),
            Self::UnknownExtension(path) => {
                write!(f, "unknown image type for '{}'", path.display())
            }
        }
    }
}

impl std::error::Error for ImageLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Format(err) => Some(err),
            Self::UnknownExtension(_) => None,
        }
    }
}

pub fn load_tga(path: impl AsRef<Path>) -> Result<DecodedImage, ImageLoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let image = decode_tga(&bytes)?;
    log_loaded(path, &image);
    Ok(image)
}

pub fn load_pcx(path: impl AsRef<Path>) -> Result<DecodedImage, ImageLoadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let image = decode_pcx(&bytes)?;
    log_loaded(path, &image);
    Ok(image)
}

/// Loads a `.tga` or `.pcx` file, chosen by extension.
pub fn load_image(path: impl AsRef<Path>) -> Result<DecodedImage, ImageLoadError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("tga") => load_tga(path),
        Some("pcx") => load_pcx(path),
        _ => Err(ImageLoadError::UnknownExtension(path.to_path_buf())),
    }
}

fn log_loaded(path: &Path, image: &DecodedImage) {
    log::debug!(
        "loaded '{}' ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
}

#[cfg(test)]
mod tests {
    use super::{ImageLoadError, load_image};

    #[test]
    fn unknown_extension_is_rejected() {
        let err = load_image("sprite.bmp").expect_err("expected error");

        assert!(matches!(err, ImageLoadError::UnknownExtension(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!(
            "pocketfb_missing_{}.tga",
            std::process::id()
        ));

        let err = load_image(&path).expect_err("expected error");

        assert!(matches!(err, ImageLoadError::Io(_)));
    }
}
