use crate::{
    error::{result_from_code, CtruResult},
    keys::KeyPad,
};

/// Handle to the HID service, reference counted by libctru.
pub struct Hid {
    _private: (),
}

impl Hid {
    pub fn new() -> CtruResult<Self> {
        result_from_code(unsafe { ctru_sys::hidInit() })?;
        Ok(Hid { _private: () })
    }

    /// Samples the buttons; the `keys_*` getters report this scan.
    pub fn scan_input(&mut self) {
        unsafe { ctru_sys::hidScanInput() }
    }

    /// Keys pressed since the previous scan.
    pub fn keys_down(&self) -> KeyPad {
        KeyPad::from_bits_retain(unsafe { ctru_sys::hidKeysDown() })
    }

    pub fn keys_held(&self) -> KeyPad {
        KeyPad::from_bits_retain(unsafe { ctru_sys::hidKeysHeld() })
    }

    pub fn keys_up(&self) -> KeyPad {
        KeyPad::from_bits_retain(unsafe { ctru_sys::hidKeysUp() })
    }
}

impl Drop for Hid {
    fn drop(&mut self) {
        unsafe { ctru_sys::hidExit() }
    }
}
