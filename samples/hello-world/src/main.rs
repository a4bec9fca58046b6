#![no_main]
#![no_std]

use ctru::{
    app::App,
    console::{Console, Cursor},
    frame,
    gfx::{Gfx, Screen},
    keys::KeyPad,
};

const GREETING: (Cursor, &str) = (Cursor::new(16, 20), "Hello World!");
const EXIT_HINT: (Cursor, &str) = (Cursor::new(30, 16), "Press Start to exit.");

#[no_mangle]
pub extern "C" fn main(
    _argc: ctru_sys::c_int,
    _argv: *const *const ctru_sys::c_char,
) -> ctru_sys::c_int {
    let Some(gfx) = Gfx::init() else {
        return 1;
    };

    let status = {
        let mut console = Console::init(&gfx, Screen::Top);
        for (cursor, text) in [GREETING, EXIT_HINT] {
            if console.print_at(cursor, text).is_err() {
                break;
            }
        }

        match App::new(&gfx) {
            Ok(mut app) => {
                frame::run_until(&mut app, KeyPad::START);
                0
            }
            Err(e) => e.code().get(),
        }
    };

    drop(gfx);
    status
}

#[panic_handler]
fn panic_handler(_: &core::panic::PanicInfo) -> ! {
    loop {}
}
