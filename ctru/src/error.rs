use core::num::NonZeroI32;

pub type CtruResult<T> = Result<T, CtruError>;

#[track_caller]
pub fn result_from_code(code: ctru_sys::Result) -> CtruResult<()> {
    match NonZeroI32::new(code) {
        Some(code) if code.get() < 0 => Err(CtruError::from_raw_error(code)),
        _ => Ok(()),
    }
}

/// Failed libctru `Result` code.
///
/// Bit layout: `level:5 | summary:6 | reserved:3 | module:8 | description:10`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CtruError(NonZeroI32);

impl CtruError {
    pub fn from_raw_error(code: NonZeroI32) -> CtruError {
        CtruError(code)
    }

    pub fn code(&self) -> NonZeroI32 {
        self.0
    }

    fn bits(&self) -> u32 {
        self.0.get() as u32
    }

    pub fn level(&self) -> u8 {
        ((self.bits() >> 27) & 0x1F) as u8
    }

    pub fn summary(&self) -> u8 {
        ((self.bits() >> 21) & 0x3F) as u8
    }

    pub fn module(&self) -> u8 {
        ((self.bits() >> 10) & 0xFF) as u8
    }

    pub fn description(&self) -> u16 {
        (self.bits() & 0x3FF) as u16
    }
}

impl core::fmt::Display for CtruError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "libctru error {:#010x} (level {}, summary {}, module {}, description {})",
            self.bits(),
            self.level(),
            self.summary(),
            self.module(),
            self.description()
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CtruError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_and_positive_codes_are_ok() {
        assert_eq!(result_from_code(0), Ok(()));
        assert_eq!(result_from_code(1), Ok(()));
    }

    #[test]
    fn negative_code_is_decoded() {
        // permanent, invalid state, application module, already initialized
        let raw = 0xE0A3_F9F6_u32 as i32;
        let err = result_from_code(raw).unwrap_err();
        assert_eq!(err.code().get(), raw);
        assert_eq!(err.level(), 0x1C);
        assert_eq!(err.summary(), 5);
        assert_eq!(err.module(), 0xFE);
        assert_eq!(err.description(), 0x1F6);
    }

    #[test]
    fn display_includes_hex_code() {
        let err = CtruError::from_raw_error(NonZeroI32::new(0xD8E0_07F7_u32 as i32).unwrap());
        let text = format!("{err}");
        assert!(text.starts_with("libctru error 0xd8e007f7"), "{text}");
    }
}
