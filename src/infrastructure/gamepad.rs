use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read};
use std::os::unix::fs::OpenOptionsExt;
use std::path::Path;

use crate::domain::{Button, InputEvent, KeyAction, KeyState};

pub const DEFAULT_INPUT_DEVICE: &str = "/dev/event0";

/// Size of one kernel `input_event` record on this target.
pub const EVENT_RECORD_LEN: usize = std::mem::size_of::<libc::input_event>();
// type, code and value occupy the last eight bytes, after the timestamp.
const FIELDS_LEN: usize = 8;

#[derive(Debug)]
pub enum InputError {
    Open(std::io::Error),
    Read(std::io::Error),
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open(err) => write!(f, "can't get access to gamepad: {}", err),
            Self::Read(err) => write!(f, "can't read gamepad events: {}", err),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open(err) | Self::Read(err) => Some(err),
        }
    }
}

/// Polls key events from an evdev node without blocking.
#[derive(Debug)]
pub struct Gamepad<R = File> {
    source: R,
    record: Vec<u8>,
    state: KeyState,
}

impl Gamepad<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NONBLOCK | libc::O_NOCTTY)
            .open(path)
            .map_err(InputError::Open)?;
        log::info!("opened input device '{}'", path.display());
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> Gamepad<R> {
    pub fn from_reader(source: R) -> Self {
        Self {
            source,
            record: vec![0; EVENT_RECORD_LEN],
            state: KeyState::default(),
        }
    }

    /// Drains pending events until a key press or release, or until none are left.
    pub fn update(&mut self) -> Result<(), InputError> {
        self.state.reset();
        loop {
            match self.source.read(&mut self.record) {
                Ok(len) if len == EVENT_RECORD_LEN => {}
                Ok(_) => break,
                Err(err) if err.kind() == ErrorKind::WouldBlock => break,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(InputError::Read(err)),
            }
            if !self.state.apply(decode_event(&self.record)) {
                break;
            }
        }
        Ok(())
    }

    pub fn state(&self) -> KeyState {
        self.state
    }

    pub fn action(&self) -> KeyAction {
        self.state.action()
    }

    pub fn pressed(&self) -> Option<Button> {
        self.state.pressed()
    }

    pub fn held(&self) -> Option<Button> {
        self.state.held()
    }

    pub fn released(&self) -> Option<Button> {
        self.state.released()
    }
}

pub fn decode_event(record: &[u8]) -> InputEvent {
    let fields = &record[record.len() - FIELDS_LEN..];
    InputEvent {
        kind: u16::from_ne_bytes([fields[0], fields[1]]),
        code: u16::from_ne_bytes([fields[2], fields[3]]),
        value: i32::from_ne_bytes([fields[4], fields[5], fields[6], fields[7]]),
    }
}
