#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod asm;
pub mod console;
pub mod error;
pub mod frame;
pub mod keys;

#[cfg(feature = "app")]
pub mod app;
#[cfg(feature = "apt")]
pub mod apt;
#[cfg(feature = "gfx")]
pub mod gfx;
#[cfg(feature = "hid")]
pub mod hid;

pub use error::{CtruError, CtruResult};
