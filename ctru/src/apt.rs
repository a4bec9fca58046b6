use crate::error::{result_from_code, CtruResult};

/// Handle to the applet manager, reference counted by libctru.
pub struct Apt {
    _private: (),
}

impl Apt {
    pub fn new() -> CtruResult<Self> {
        result_from_code(unsafe { ctru_sys::aptInit() })?;
        Ok(Apt { _private: () })
    }

    /// Services applet events; `false` once the application should quit.
    pub fn main_loop(&self) -> bool {
        unsafe { ctru_sys::aptMainLoop() }
    }
}

impl Drop for Apt {
    fn drop(&mut self) {
        unsafe { ctru_sys::aptExit() }
    }
}
