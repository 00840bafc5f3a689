use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::os::fd::AsRawFd;
use std::path::Path;

use crate::domain::{DisplayGeometry, Framebuffer, FramebufferError};

pub const DEFAULT_FRAMEBUFFER_DEVICE: &str = "/dev/fb0";

const FBIOGET_VSCREENINFO: u32 = 0x4600;
const FBIOGET_FSCREENINFO: u32 = 0x4602;
const HARDWARE_BITS_PER_PIXEL: u32 = 16;

#[derive(Debug)]
pub enum DeviceError {
    Open(std::io::Error),
    Geometry(std::io::Error),
    Write(std::io::Error),
}

impl std::fmt::Display for DeviceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "can't get access to frame buffer: {}", err),
            Self::Geometry(err) => write!(f, "can't read framebuffer setting: {}", err),
            Self::Write(err) => write!(f, "can't write to frame buffer: {}", err),
        }
    }
}

impl std::error::Error for DeviceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open(err) | Self::Geometry(err) | Self::Write(err) => Some(err),
        }
    }
}

/// A framebuffer device the packed frame is written to.
///
/// The sink is any seekable writer; [`FbDevice::open`] binds it to a Linux fbdev node.
#[derive(Debug)]
pub struct FbDevice<W = File> {
    sink: W,
    geometry: DisplayGeometry,
    start: u64,
}

impl FbDevice<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DeviceError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .map_err(DeviceError::Open)?;
        let geometry = read_geometry(&file)?;
        log::info!(
            "opened '{}': {}x{} at {} bpp, line length {}",
            path.display(),
            geometry.width,
            geometry.height,
            geometry.bits_per_pixel,
            geometry.line_length
        );
        if geometry.bits_per_pixel != HARDWARE_BITS_PER_PIXEL {
            log::warn!(
                "display reports {} bpp; frames are written as 16-bit RGB565",
                geometry.bits_per_pixel
            );
        }
        Ok(Self::with_sink(file, geometry))
    }
}

impl<W: Write + Seek> FbDevice<W> {
    pub fn with_sink(sink: W, geometry: DisplayGeometry) -> Self {
        Self {
            sink,
            geometry,
            start: geometry.start_offset(),
        }
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.geometry
    }

    pub fn start_offset(&self) -> u64 {
        self.start
    }

    pub fn create_framebuffer(&self) -> Result<Framebuffer, FramebufferError> {
        Framebuffer::new(self.geometry.width as usize, self.geometry.height as usize)
    }

    /// Writes the whole frame at the visible area's offset.
    pub fn refresh(&mut self, framebuffer: &Framebuffer) -> Result<(), DeviceError> {
        self.sink
            .seek(SeekFrom::Start(self.start))
            .map_err(DeviceError::Write)?;
        self.sink
            .write_all(framebuffer.as_bytes())
            .map_err(DeviceError::Write)?;
        self.sink.flush().map_err(DeviceError::Write)
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }
}

#[repr(C)]
#[derive(Debug, Default)]
#[allow(dead_code)]
struct FbBitfield {
    offset: u32,
    length: u32,
    msb_right: u32,
}

#[repr(C)]
#[derive(Debug, Default)]
#[allow(dead_code)]
struct FbVarScreeninfo {
    xres: u32,
    yres: u32,
    xres_virtual: u32,
    yres_virtual: u32,
    xoffset: u32,
    yoffset: u32,
    bits_per_pixel: u32,
    grayscale: u32,
    red: FbBitfield,
    green: FbBitfield,
    blue: FbBitfield,
    transp: FbBitfield,
    nonstd: u32,
    activate: u32,
    height: u32,
    width: u32,
    accel_flags: u32,
    pixclock: u32,
    left_margin: u32,
    right_margin: u32,
    upper_margin: u32,
    lower_margin: u32,
    hsync_len: u32,
    vsync_len: u32,
    sync: u32,
    vmode: u32,
    rotate: u32,
    colorspace: u32,
    reserved: [u32; 4],
}

#[repr(C)]
#[derive(Debug, Default)]
#[allow(dead_code)]
struct FbFixScreeninfo {
    id: [u8; 16],
    smem_start: libc::c_ulong,
    smem_len: u32,
    kind: u32,
    kind_aux: u32,
    visual: u32,
    xpanstep: u16,
    ypanstep: u16,
    ywrapstep: u16,
    line_length: u32,
    mmio_start: libc::c_ulong,
    mmio_len: u32,
    accel: u32,
    capabilities: u16,
    reserved: [u16; 2],
}

fn read_geometry(file: &File) -> Result<DisplayGeometry, DeviceError> {
    let fd = file.as_raw_fd();
    let mut var = FbVarScreeninfo::default();
    let mut fix = FbFixScreeninfo::default();

    // SAFETY: `fd` is open for the duration of the calls and both records mirror the
    // kernel's `fb_var_screeninfo` / `fb_fix_screeninfo` layouts.
    let var_result =
        unsafe { libc::ioctl(fd, FBIOGET_VSCREENINFO as _, &mut var as *mut FbVarScreeninfo) };
    if var_result == -1 {
        return Err(DeviceError::Geometry(std::io::Error::last_os_error()));
    }
    // SAFETY: as above.
    let fix_result =
        unsafe { libc::ioctl(fd, FBIOGET_FSCREENINFO as _, &mut fix as *mut FbFixScreeninfo) };
    if fix_result == -1 {
        return Err(DeviceError::Geometry(std::io::Error::last_os_error()));
    }

    Ok(DisplayGeometry {
        width: var.xres,
        height: var.yres,
        bits_per_pixel: var.bits_per_pixel,
        x_offset: var.xoffset,
        y_offset: var.yoffset,
        line_length: fix.line_length,
    })
}

#[cfg(test)]
mod tests {
    use super::{DeviceError, FbDevice, FbFixScreeninfo, FbVarScreeninfo};
    use crate::domain::{DisplayGeometry, Pixel};
    use std::io::Cursor;

    fn geometry() -> DisplayGeometry {
        DisplayGeometry {
            width: 2,
            height: 2,
            bits_per_pixel: 16,
            x_offset: 1,
            y_offset: 1,
            line_length: 8,
        }
    }

    #[test]
    fn kernel_record_sizes_match() {
        assert_eq!(std::mem::size_of::<FbVarScreeninfo>(), 160);
        let expected_fix = if cfg!(target_pointer_width = "64") { 80 } else { 68 };
        assert_eq!(std::mem::size_of::<FbFixScreeninfo>(), expected_fix);
    }

    #[test]
    fn refresh_writes_frame_at_start_offset() {
        let mut device = FbDevice::with_sink(Cursor::new(Vec::new()), geometry());
        let mut framebuffer = device.create_framebuffer().expect("framebuffer");
        framebuffer.draw_pixel(0, 0, Pixel::WHITE);
        framebuffer.draw_pixel(1, 1, Pixel::new(0xFF, 0, 0));

        device.refresh(&framebuffer).expect("refresh");

        let written = device.into_sink().into_inner();
        assert_eq!(written.len(), 10 + 8);
        assert!(written[..10].iter().all(|&byte| byte == 0));
        assert_eq!(&written[10..12], &0xFFFFu16.to_ne_bytes());
        assert_eq!(&written[16..18], &0xF800u16.to_ne_bytes());
    }

    #[test]
    fn refresh_overwrites_previous_frame() {
        let mut device = FbDevice::with_sink(Cursor::new(Vec::new()), geometry());
        let mut framebuffer = device.create_framebuffer().expect("framebuffer");
        framebuffer.draw_pixel(0, 0, Pixel::WHITE);
        device.refresh(&framebuffer).expect("refresh");

        framebuffer.clear();
        device.refresh(&framebuffer).expect("refresh");

        let written = device.into_sink().into_inner();
        assert_eq!(written.len(), 18);
        assert!(written.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn open_missing_device_fails() {
        let path = std::env::temp_dir().join(format!("pocketfb_no_fb_{}", std::process::id()));

        let err = FbDevice::open(&path).expect_err("expected error");

        assert!(matches!(err, DeviceError::Open(_)));
    }

    #[test]
    fn regular_file_has_no_geometry() {
        let path = std::env::temp_dir().join(format!("pocketfb_fake_fb_{}", std::process::id()));
        std::fs::write(&path, [0u8; 16]).expect("write");

        let err = FbDevice::open(&path).expect_err("expected error");

        assert!(matches!(err, DeviceError::Geometry(_)));
        let _ = std::fs::remove_file(&path);
    }
}
