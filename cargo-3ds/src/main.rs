use color_eyre::eyre::{self, WrapErr};
use tracing_error::ErrorLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .with(ErrorLayer::default())
        .init();
    color_eyre::install()?;

    let mut args: Vec<String> = std::env::args().collect();
    // arg0
    args.remove(0);

    eyre::ensure!(
        args.first().map(String::as_str) == Some("3ds"),
        "first argument should be equal to `3ds`, run this as `cargo 3ds`"
    );
    args.remove(0);

    match args.first().map(String::as_str) {
        Some("build" | "b") => cargo_3ds::build(&args[1..])
            .await
            .wrap_err("Executing `cargo 3ds build` subcommand")?,
        Some("asminc") => cargo_3ds::asminc(&args[1..])
            .await
            .wrap_err("Executing `cargo 3ds asminc` subcommand")?,
        Some("help") | None => print_help(),
        // if flag instead of subcommand
        Some(flag) if flag.starts_with('-') => {
            if args.iter().any(|a| matches!(a.as_str(), "-h" | "--help")) {
                print_help();
            } else if args
                .iter()
                .any(|a| matches!(a.as_str(), "-V" | "--version"))
            {
                eprintln!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            } else {
                eyre::bail!("Unknown flag: {flag}");
            }
        }
        Some(unknown) => eyre::bail!(
            "Unknown subcommand: {unknown}. Type `cargo 3ds help` to print help."
        ),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        "Cargo wrapper for building Nintendo 3DS homebrew

USAGE:
    cargo [+toolchain] 3ds [OPTIONS] [SUBCOMMAND]

Subcommands:
    build, b    Compile the current package and pack it into .3dsx
    asminc      Print the assembler include file with BEGIN_ASM_FUNC/END_ASM_FUNC
                    --assembler <llvm|gnu>   assembler flavor (default: llvm)
                    --output <PATH>          write to PATH instead of stdout
    help        Print help

Environment:
    DEVKITPRO   devkitPro install root, required by `build`
    RUST_LOG    log filter, e.g. `cargo_3ds=debug`
"
    );
}
