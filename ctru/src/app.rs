use crate::{
    apt::Apt,
    error::CtruResult,
    frame::Platform,
    gfx::Gfx,
    hid::Hid,
    keys::KeyPad,
};

/// The services a frame loop runs on.
pub struct App<'gfx> {
    gfx: &'gfx Gfx,
    hid: Hid,
    apt: Apt,
}

impl<'gfx> App<'gfx> {
    pub fn new(gfx: &'gfx Gfx) -> CtruResult<Self> {
        Ok(App {
            gfx,
            hid: Hid::new()?,
            apt: Apt::new()?,
        })
    }
}

impl Platform for App<'_> {
    fn main_loop(&mut self) -> bool {
        self.apt.main_loop()
    }

    fn scan_input(&mut self) -> KeyPad {
        self.hid.scan_input();
        self.hid.keys_down()
    }

    fn present(&mut self) {
        self.gfx.flush_buffers();
        self.gfx.swap_buffers();
    }

    fn wait_for_vblank(&mut self) {
        self.gfx.wait_for_vblank();
    }
}
