#![no_std]
#![allow(nonstandard_style)]

mod ctypes {
    pub use ::core::ffi::c_void;

    pub type c_char = u8;
    pub type c_int = i32;
    pub type c_uint = u32;
    pub type c_size_t = u32;
    pub type c_ssize_t = i32;
}

pub use ctypes::*;

/// libctru `Result`: negative on failure
pub type Result = i32;

pub type gfxScreen_t = c_uint;
pub const GFX_TOP: gfxScreen_t = 0;
pub const GFX_BOTTOM: gfxScreen_t = 1;

pub type GSPGPU_Event = c_uint;
pub const GSPGPU_EVENT_PSC0: GSPGPU_Event = 0;
pub const GSPGPU_EVENT_PSC1: GSPGPU_Event = 1;
pub const GSPGPU_EVENT_VBlank0: GSPGPU_Event = 2;
pub const GSPGPU_EVENT_VBlank1: GSPGPU_Event = 3;
pub const GSPGPU_EVENT_PPF: GSPGPU_Event = 4;
pub const GSPGPU_EVENT_P3D: GSPGPU_Event = 5;
pub const GSPGPU_EVENT_DMA: GSPGPU_Event = 6;

pub const KEY_A: u32 = 1 << 0;
pub const KEY_B: u32 = 1 << 1;
pub const KEY_SELECT: u32 = 1 << 2;
pub const KEY_START: u32 = 1 << 3;
pub const KEY_DRIGHT: u32 = 1 << 4;
pub const KEY_DLEFT: u32 = 1 << 5;
pub const KEY_DUP: u32 = 1 << 6;
pub const KEY_DDOWN: u32 = 1 << 7;
pub const KEY_R: u32 = 1 << 8;
pub const KEY_L: u32 = 1 << 9;
pub const KEY_X: u32 = 1 << 10;
pub const KEY_Y: u32 = 1 << 11;
pub const KEY_ZL: u32 = 1 << 14;
pub const KEY_ZR: u32 = 1 << 15;
pub const KEY_TOUCH: u32 = 1 << 20;
pub const KEY_CSTICK_RIGHT: u32 = 1 << 24;
pub const KEY_CSTICK_LEFT: u32 = 1 << 25;
pub const KEY_CSTICK_UP: u32 = 1 << 26;
pub const KEY_CSTICK_DOWN: u32 = 1 << 27;
pub const KEY_CPAD_RIGHT: u32 = 1 << 28;
pub const KEY_CPAD_LEFT: u32 = 1 << 29;
pub const KEY_CPAD_UP: u32 = 1 << 30;
pub const KEY_CPAD_DOWN: u32 = 1 << 31;

/// Opaque, only ever handled through the pointer `consoleInit` returns.
#[repr(C)]
pub struct PrintConsole {
    _private: [u8; 0],
}

// Link directives come from build.rs, only for the horizon target.
extern "C" {
    pub fn gfxInitDefault();
    pub fn gfxExit();
    pub fn gfxFlushBuffers();
    pub fn gfxSwapBuffers();

    pub fn gspWaitForEvent(id: GSPGPU_Event, nextEvent: bool);

    pub fn consoleInit(screen: gfxScreen_t, console: *mut PrintConsole) -> *mut PrintConsole;
    pub fn consoleSelect(console: *mut PrintConsole) -> *mut PrintConsole;
    pub fn consoleClear();

    pub fn hidInit() -> Result;
    pub fn hidExit();
    pub fn hidScanInput();
    pub fn hidKeysHeld() -> u32;
    pub fn hidKeysDown() -> u32;
    pub fn hidKeysUp() -> u32;

    pub fn aptInit() -> Result;
    pub fn aptExit();
    pub fn aptMainLoop() -> bool;
}

/// `gspWaitForVBlank` is a macro in the C headers.
///
/// # Safety
///
/// GSP must be initialized, which `gfxInitDefault` does.
#[inline]
pub unsafe fn gspWaitForVBlank() {
    gspWaitForEvent(GSPGPU_EVENT_VBlank0, true)
}

// newlib
extern "C" {
    pub fn write(fd: c_int, buf: *const c_void, count: c_size_t) -> c_ssize_t;
}

pub const STDOUT_FILENO: c_int = 1;
