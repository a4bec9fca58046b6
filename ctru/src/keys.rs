use bitflags::bitflags;

bitflags! {
    /// Buttons, in the bit layout `hidKeys*` report them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyPad: u32 {
        const A = ctru_sys::KEY_A;
        const B = ctru_sys::KEY_B;
        const SELECT = ctru_sys::KEY_SELECT;
        const START = ctru_sys::KEY_START;
        const DPAD_RIGHT = ctru_sys::KEY_DRIGHT;
        const DPAD_LEFT = ctru_sys::KEY_DLEFT;
        const DPAD_UP = ctru_sys::KEY_DUP;
        const DPAD_DOWN = ctru_sys::KEY_DDOWN;
        const R = ctru_sys::KEY_R;
        const L = ctru_sys::KEY_L;
        const X = ctru_sys::KEY_X;
        const Y = ctru_sys::KEY_Y;
        const ZL = ctru_sys::KEY_ZL;
        const ZR = ctru_sys::KEY_ZR;
        const TOUCH = ctru_sys::KEY_TOUCH;
        const CSTICK_RIGHT = ctru_sys::KEY_CSTICK_RIGHT;
        const CSTICK_LEFT = ctru_sys::KEY_CSTICK_LEFT;
        const CSTICK_UP = ctru_sys::KEY_CSTICK_UP;
        const CSTICK_DOWN = ctru_sys::KEY_CSTICK_DOWN;
        const CPAD_RIGHT = ctru_sys::KEY_CPAD_RIGHT;
        const CPAD_LEFT = ctru_sys::KEY_CPAD_LEFT;
        const CPAD_UP = ctru_sys::KEY_CPAD_UP;
        const CPAD_DOWN = ctru_sys::KEY_CPAD_DOWN;

        const UP = Self::DPAD_UP.bits() | Self::CPAD_UP.bits();
        const DOWN = Self::DPAD_DOWN.bits() | Self::CPAD_DOWN.bits();
        const LEFT = Self::DPAD_LEFT.bits() | Self::CPAD_LEFT.bits();
        const RIGHT = Self::DPAD_RIGHT.bits() | Self::CPAD_RIGHT.bits();
    }
}

/// Held keys of the last two scans.
///
/// libctru computes the same edges inside `hidScanInput`; this is the
/// portable version for input sources that only report levels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyState {
    pub held: KeyPad,
    pub held_last: KeyPad,
}

impl KeyState {
    pub const fn new() -> Self {
        KeyState {
            held: KeyPad::empty(),
            held_last: KeyPad::empty(),
        }
    }

    /// Records a new scan and returns the keys pressed since the previous one.
    pub fn update(&mut self, held: KeyPad) -> KeyPad {
        self.held_last = self.held;
        self.held = held;
        self.down()
    }

    pub fn down(&self) -> KeyPad {
        self.held.difference(self.held_last)
    }

    pub fn up(&self) -> KeyPad {
        self.held_last.difference(self.held)
    }

    /// Returns true only on the frame the key was first pressed.
    #[inline]
    pub fn just_pressed(&self, keys: KeyPad) -> bool {
        self.down().intersects(keys)
    }

    #[inline]
    pub fn just_released(&self, keys: KeyPad) -> bool {
        self.up().intersects(keys)
    }
}
