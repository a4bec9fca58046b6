use std::env;

use camino::Utf8PathBuf;
use color_eyre::eyre::{self, WrapErr};

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    println!("cargo:rerun-if-env-changed=DEVKITPRO");

    let target_os = env::var("CARGO_CFG_TARGET_OS").wrap_err("Reading CARGO_CFG_TARGET_OS")?;
    if target_os != "horizon" {
        // Host builds (tests, tooling) never call into libctru.
        log::info!("Target os is `{target_os}`, not linking libctru");
        return Ok(());
    }

    let devkitpro = Utf8PathBuf::from(env::var("DEVKITPRO").expect(
        "devkitPro isn't installed or DEVKITPRO environment variable isn't set to a valid unicode",
    ));
    let libctru = devkitpro.join("libctru");

    assert!(
        libctru.exists(),
        "libctru does not exist under DEVKITPRO, please install the 3ds-dev package group first"
    );

    let lib = libctru.join("lib");
    assert!(lib.exists(), "libctru's `lib` directory does not exist");
    println!("cargo:rustc-link-search=native={lib}");

    let profile = env::var("PROFILE").wrap_err("Reading PROFILE")?;
    let lib_name = match profile.as_str() {
        "debug" => "ctrud",
        _ => "ctru",
    };
    log::info!("Linking against `{lib_name}` from \"{lib}\"");
    println!("cargo:rustc-link-lib=static={lib_name}");

    let include = libctru.join("include");
    assert!(include.exists(), "libctru's `include` directory does not exist");
    println!("cargo:rerun-if-changed={include}");
    println!("cargo:include={include}");

    Ok(())
}
