use core::fmt;

/// Console position, 1-based, rendered as the `ESC [ row ; column H`
/// escape the libctru console understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub row: u16,
    pub column: u16,
}

impl Cursor {
    pub const fn new(row: u16, column: u16) -> Self {
        Cursor { row, column }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\x1b[{};{}H", self.row, self.column)
    }
}

/// Moves the cursor, then writes `text`.
pub fn write_at<W>(out: &mut W, cursor: Cursor, text: &str) -> fmt::Result
where
    W: fmt::Write + ?Sized,
{
    write!(out, "{cursor}")?;
    out.write_str(text)
}

#[cfg(feature = "console")]
pub use self::screen::Console;

#[cfg(feature = "console")]
mod screen {
    use core::{fmt, marker::PhantomData, ptr};

    use super::Cursor;
    use crate::gfx::{Gfx, Screen};

    /// Text console drawn onto one screen's framebuffer.
    ///
    /// Borrows the graphics context, so it cannot outlive `gfxExit`.
    pub struct Console<'gfx> {
        raw: *mut ctru_sys::PrintConsole,
        _gfx: PhantomData<&'gfx Gfx>,
    }

    impl<'gfx> Console<'gfx> {
        /// Binds libctru's default console to `screen` and selects it for
        /// stdout.
        pub fn init(_gfx: &'gfx Gfx, screen: Screen) -> Self {
            let raw = unsafe { ctru_sys::consoleInit(screen as u32, ptr::null_mut()) };
            Console {
                raw,
                _gfx: PhantomData,
            }
        }

        /// Routes stdout to this console again.
        pub fn select(&self) {
            unsafe { ctru_sys::consoleSelect(self.raw) };
        }

        pub fn clear(&mut self) {
            unsafe { ctru_sys::consoleClear() }
        }

        pub fn print_at(&mut self, cursor: Cursor, text: &str) -> fmt::Result {
            super::write_at(self, cursor, text)
        }
    }

    impl fmt::Write for Console<'_> {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let mut bytes = s.as_bytes();
            while !bytes.is_empty() {
                let written = unsafe {
                    ctru_sys::write(
                        ctru_sys::STDOUT_FILENO,
                        bytes.as_ptr().cast(),
                        bytes.len() as ctru_sys::c_size_t,
                    )
                };
                if written <= 0 {
                    return Err(fmt::Error);
                }
                bytes = &bytes[written as usize..];
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_escape() {
        assert_eq!(Cursor::new(16, 20).to_string(), "\x1b[16;20H");
        assert_eq!(Cursor::new(1, 1).to_string(), "\x1b[1;1H");
    }

    #[test]
    fn write_at_touches_only_given_positions() {
        let mut out = String::new();
        write_at(&mut out, Cursor::new(16, 20), "Hello World!").unwrap();
        write_at(&mut out, Cursor::new(30, 16), "Press Start to exit.").unwrap();

        assert_eq!(
            out,
            "\x1b[16;20HHello World!\x1b[30;16HPress Start to exit."
        );
        assert_eq!(out.matches('\x1b').count(), 2);
    }

    /// Accepts `budget` bytes, then fails like a short `write`.
    struct Closed {
        budget: usize,
    }

    impl fmt::Write for Closed {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.budget = self.budget.checked_sub(s.len()).ok_or(fmt::Error)?;
            Ok(())
        }
    }

    #[test]
    fn write_at_reports_failed_write() {
        assert!(write_at(&mut Closed { budget: 0 }, Cursor::new(16, 20), "Hello World!").is_err());
        // escape accepted, text refused
        assert!(write_at(&mut Closed { budget: 8 }, Cursor::new(16, 20), "Hello World!").is_err());
        assert!(write_at(&mut Closed { budget: 64 }, Cursor::new(16, 20), "Hello World!").is_ok());
    }
}
