pub mod fbdev;
pub mod gamepad;
pub mod image_loader;
#[cfg(feature = "snapshot")]
pub mod snapshot;
