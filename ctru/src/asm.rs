//! Function prologue/epilogue directives for hand-written ARM assembly.
//!
//! Every function gets its own `.<section>.<name>` section, 4-byte
//! alignment, a linkage directive, a `%function` type and a balanced
//! `.cfi_startproc`/`.cfi_endproc` pair emitted into `.debug_frame`.
//!
//! ```ignore
//! ctru::asm_func!(svc_sleep_thread {
//!     "svc 0x0A"
//!     "bx lr"
//! });
//! ```

use core::fmt;

/// Expands to the prologue directives as a string literal.
///
/// `linkage` is one of `global` (default), `local` or `weak`; `section`
/// defaults to `text` and may be a string literal for dotted categories
/// such as `"text.hot"`.
#[macro_export]
macro_rules! asm_func_begin {
    ($name:ident) => {
        $crate::asm_func_begin!($name, global, text)
    };
    ($name:ident, $linkage:ident) => {
        $crate::asm_func_begin!($name, $linkage, text)
    };
    ($name:ident, $linkage:ident, $section:ident) => {
        concat!(
            ".section .", stringify!($section), ".", stringify!($name), ", \"ax\", %progbits\n",
            ".align 2\n",
            ".", stringify!($linkage), " ", stringify!($name), "\n",
            ".type ", stringify!($name), ", %function\n",
            ".cfi_sections .debug_frame\n",
            ".cfi_startproc\n",
            stringify!($name), ":\n",
        )
    };
    ($name:ident, $linkage:ident, $section:literal) => {
        concat!(
            ".section .", $section, ".", stringify!($name), ", \"ax\", %progbits\n",
            ".align 2\n",
            ".", stringify!($linkage), " ", stringify!($name), "\n",
            ".type ", stringify!($name), ", %function\n",
            ".cfi_sections .debug_frame\n",
            ".cfi_startproc\n",
            stringify!($name), ":\n",
        )
    };
}

/// Expands to the epilogue directives as a string literal.
#[cfg(not(feature = "legacy-gnu-as"))]
#[macro_export]
macro_rules! asm_func_end {
    () => {
        ".cfi_endproc\n"
    };
}

/// Rejected when building for GNU `as`:
///
/// ```compile_fail
/// let _: &str = ctru::asm_func_end!();
/// ```
///
/// ```compile_fail
/// ctru::asm_func!(f {
///     "bx lr"
/// });
/// ```
#[cfg(feature = "legacy-gnu-as")]
#[macro_export]
macro_rules! asm_func_end {
    () => {
        compile_error!("function epilogue for GNU as (`.endfunc`) is unsupported")
    };
}

/// Defines a whole assembly function with `global_asm!`.
#[macro_export]
macro_rules! asm_func {
    ($name:ident $(, $linkage:ident $(, $section:tt)?)? { $($line:literal)* }) => {
        ::core::arch::global_asm!(
            concat!(
                $crate::asm_func_begin!($name $(, $linkage $(, $section)?)?),
                $($line, "\n",)*
                $crate::asm_func_end!(),
            ),
            options(raw)
        );
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Linkage {
    #[default]
    Global,
    Local,
    Weak,
}

impl Linkage {
    pub const fn directive(self) -> &'static str {
        match self {
            Linkage::Global => ".global",
            Linkage::Local => ".local",
            Linkage::Weak => ".weak",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "global" => Some(Linkage::Global),
            "local" => Some(Linkage::Local),
            "weak" => Some(Linkage::Weak),
            _ => None,
        }
    }
}

/// Assembler that consumes the directives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Assembler {
    /// LLVM's integrated assembler, what rustc and clang use.
    #[default]
    Llvm,
    /// GNU `as` from binutils.
    Gnu,
}

impl Assembler {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "llvm" | "clang" => Some(Assembler::Llvm),
            "gnu" | "gas" => Some(Assembler::Gnu),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AsmError {
    /// The `.endfunc` epilogue path for GNU `as` is not maintained.
    LegacyToolchain,
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsmError::LegacyToolchain => {
                f.write_str("function epilogue for GNU as (`.endfunc`) is unsupported")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AsmError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FuncPrologue<'a> {
    pub name: &'a str,
    pub linkage: Linkage,
    pub section: &'a str,
    pub assembler: Assembler,
}

impl<'a> FuncPrologue<'a> {
    pub fn new(name: &'a str) -> Self {
        FuncPrologue {
            name,
            linkage: Linkage::Global,
            section: "text",
            assembler: Assembler::Llvm,
        }
    }

    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    pub fn with_section(mut self, section: &'a str) -> Self {
        self.section = section;
        self
    }

    pub fn with_assembler(mut self, assembler: Assembler) -> Self {
        self.assembler = assembler;
        self
    }
}

impl fmt::Display for FuncPrologue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let FuncPrologue { name, .. } = *self;
        writeln!(f, ".section .{}.{name}, \"ax\", %progbits", self.section)?;
        writeln!(f, ".align 2")?;
        writeln!(f, "{} {name}", self.linkage.directive())?;
        writeln!(f, ".type {name}, %function")?;
        if self.assembler == Assembler::Gnu {
            writeln!(f, ".func {name}")?;
        }
        writeln!(f, ".cfi_sections .debug_frame")?;
        writeln!(f, ".cfi_startproc")?;
        writeln!(f, "{name}:")
    }
}

pub fn epilogue(assembler: Assembler) -> Result<&'static str, AsmError> {
    match assembler {
        Assembler::Llvm => Ok(".cfi_endproc\n"),
        Assembler::Gnu => Err(AsmError::LegacyToolchain),
    }
}

const BEGIN_MACRO: &str = r#".macro BEGIN_ASM_FUNC name, linkage=global, section=text
    .section        .\section\().\name, "ax", %progbits
    .align          2
    .\linkage       \name
    .type           \name, %function
    .cfi_sections   .debug_frame
    .cfi_startproc
    \name:
.endm
"#;

/// Assembler include file defining `BEGIN_ASM_FUNC`/`END_ASM_FUNC` for
/// `.s` sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IncludeHeader {
    epilogue: &'static str,
}

pub fn include_header(assembler: Assembler) -> Result<IncludeHeader, AsmError> {
    Ok(IncludeHeader {
        epilogue: epilogue(assembler)?,
    })
}

impl fmt::Display for IncludeHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@ Function boundary macros for ARM assembly sources.")?;
        writeln!(f)?;
        f.write_str(BEGIN_MACRO)?;
        writeln!(f)?;
        writeln!(f, ".macro END_ASM_FUNC")?;
        for line in self.epilogue.lines() {
            writeln!(f, "    {line}")?;
        }
        writeln!(f, ".endm")
    }
}
