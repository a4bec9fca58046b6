use core::sync::atomic::{self, AtomicBool};

/// Graphics context set up by `gfxInitDefault`.
///
/// Only one may exist at a time; dropping it runs `gfxExit`.
#[derive(Debug)]
pub struct Gfx {
    _private: (),
}

static GFX_TAKEN: AtomicBool = AtomicBool::new(false);

impl Gfx {
    /// Initializes both screens with the default framebuffer formats,
    /// or returns `None` if a context already exists.
    pub fn init() -> Option<Self> {
        let res = GFX_TAKEN.compare_exchange(
            false,
            true,
            atomic::Ordering::Acquire,
            atomic::Ordering::Relaxed,
        );
        match res {
            Ok(_) => {
                unsafe { ctru_sys::gfxInitDefault() };
                log::debug!("Graphics initialized");
                Some(Gfx { _private: () })
            }
            Err(_) => None,
        }
    }

    pub fn flush_buffers(&self) {
        unsafe { ctru_sys::gfxFlushBuffers() }
    }

    pub fn swap_buffers(&self) {
        unsafe { ctru_sys::gfxSwapBuffers() }
    }

    /// Blocks until the top screen's next vertical blank.
    pub fn wait_for_vblank(&self) {
        unsafe { ctru_sys::gspWaitForVBlank() }
    }
}

impl Drop for Gfx {
    fn drop(&mut self) {
        unsafe { ctru_sys::gfxExit() };
        log::debug!("Graphics released");
        let _ = GFX_TAKEN.compare_exchange(
            true,
            false,
            atomic::Ordering::Release,
            atomic::Ordering::Relaxed,
        );
    }
}

#[non_exhaustive]
#[repr(u32)]
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    #[default]
    Top = ctru_sys::GFX_TOP,
    Bottom = ctru_sys::GFX_BOTTOM,
}
