pub mod background;
pub mod canvas;
pub mod collision;
pub mod display;
pub mod fps;
pub mod framebuffer;
pub mod frames;
pub mod image;
pub mod input;
pub mod pcx;
pub mod pixel;
pub mod primitive;
pub mod sprite;
pub mod text;
pub mod tga;
pub mod tileset;

pub use background::Background;
pub use canvas::{Canvas, Mirror};
pub use collision::{
    CollisionBox, check_collision, check_horizontal_collision, check_vertical_collision,
    generate_box,
};
pub use display::DisplayGeometry;
pub use fps::FpsCounter;
pub use framebuffer::{Framebuffer, FramebufferError, RenderTarget};
pub use frames::{FrameKind, FrameRegion};
pub use image::{DecodedImage, ImageError};
pub use input::{Button, InputEvent, KeyAction, KeyState};
pub use pcx::{PcxHeader, decode_pcx};
pub use pixel::{Pixel, pack_rgb565};
pub use primitive::Primitive;
pub use sprite::Sprite;
pub use text::{FONT_GLYPHS, Text};
pub use tga::{TgaHeader, TgaImageType, decode_tga};
pub use tileset::{Tileset, TilesetError};
