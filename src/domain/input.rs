pub const EV_KEY: u16 = 0x01;

const KEY_ESC: u16 = 1;
const KEY_BACKSPACE: u16 = 14;
const KEY_TAB: u16 = 15;
const KEY_ENTER: u16 = 28;
const KEY_LEFTCTRL: u16 = 29;
const KEY_LEFTSHIFT: u16 = 42;
const KEY_LEFTALT: u16 = 56;
const KEY_SPACE: u16 = 57;
const KEY_UP: u16 = 103;
const KEY_LEFT: u16 = 105;
const KEY_RIGHT: u16 = 106;
const KEY_DOWN: u16 = 108;
const KEY_POWER: u16 = 116;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    X,
    Y,
    L,
    R,
    Start,
    Select,
    Power,
    Other(u16),
}

impl Button {
    pub fn from_code(code: u16) -> Self {
        match code {
            KEY_UP => Self::Up,
            KEY_DOWN => Self::Down,
            KEY_LEFT => Self::Left,
            KEY_RIGHT => Self::Right,
            KEY_LEFTCTRL => Self::A,
            KEY_LEFTALT => Self::B,
            KEY_SPACE => Self::X,
            KEY_LEFTSHIFT => Self::Y,
            KEY_TAB => Self::L,
            KEY_BACKSPACE => Self::R,
            KEY_ENTER => Self::Start,
            KEY_ESC => Self::Select,
            KEY_POWER => Self::Power,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Self::Up => KEY_UP,
            Self::Down => KEY_DOWN,
            Self::Left => KEY_LEFT,
            Self::Right => KEY_RIGHT,
            Self::A => KEY_LEFTCTRL,
            Self::B => KEY_LEFTALT,
            Self::X => KEY_SPACE,
            Self::Y => KEY_LEFTSHIFT,
            Self::L => KEY_TAB,
            Self::R => KEY_BACKSPACE,
            Self::Start => KEY_ENTER,
            Self::Select => KEY_ESC,
            Self::Power => KEY_POWER,
            Self::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyAction {
    #[default]
    Release,
    Press,
    Hold,
}

impl KeyAction {
    fn from_value(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Release),
            1 => Some(Self::Press),
            2 => Some(Self::Hold),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: u16,
    pub code: u16,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    button: Option<Button>,
    action: KeyAction,
}

impl KeyState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Records a key event. Returns whether polling should continue, which it does only
    /// past non-key events and auto-repeat holds.
    pub fn apply(&mut self, event: InputEvent) -> bool {
        if event.kind != EV_KEY {
            return true;
        }
        let Some(action) = KeyAction::from_value(event.value) else {
            return true;
        };
        self.button = Some(Button::from_code(event.code));
        self.action = action;
        action == KeyAction::Hold
    }

    pub fn action(&self) -> KeyAction {
        self.action
    }

    pub fn pressed(&self) -> Option<Button> {
        self.button.filter(|_| self.action == KeyAction::Press)
    }

    /// The button being pressed or held down.
    pub fn held(&self) -> Option<Button> {
        self.button.filter(|_| self.action != KeyAction::Release)
    }

    pub fn released(&self) -> Option<Button> {
        self.button.filter(|_| self.action == KeyAction::Release)
    }
}
