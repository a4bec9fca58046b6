pub mod metadata;
pub mod toolchain;

use std::{
    borrow::Cow,
    env,
    path::{Path, PathBuf},
    process::Stdio,
};

use ctru::asm::{self, Assembler};
use eyre::{eyre, WrapErr};
use once_cell::sync::Lazy;
use tokio::{
    io::{self, AsyncBufReadExt},
    task::JoinHandle,
};

use crate::metadata::AppMetadata;

pub const TARGET: &str = "armv6k-nintendo-3ds";

static DEVKITPRO: Lazy<PathBuf> = Lazy::new({
    #[tracing::instrument(parent = None)]
    fn get_devkitpro_root() -> PathBuf {
        let path = PathBuf::from(env::var_os("DEVKITPRO").expect(
            "DEVKITPRO environment variable isn't set, devkitPro isn't properly installed.",
        ));
        tracing::info!(?path);
        path
    }

    get_devkitpro_root
});

static CARGO: Lazy<Cow<'static, Path>> = Lazy::new({
    #[tracing::instrument(parent = None)]
    fn get_cargo_bin() -> Cow<'static, Path> {
        let path = env::var_os("CARGO").map_or(Cow::Borrowed(Path::new("cargo")), |bin| {
            Cow::Owned(PathBuf::from(bin))
        });
        tracing::info!(?path);
        path
    }

    get_cargo_bin
});

/// `cargo 3ds build`: compiles the package and packs every executable
/// into a `.3dsx`.
#[tracing::instrument]
pub async fn build(args: &[String]) -> eyre::Result<()> {
    Lazy::force(&DEVKITPRO);

    let manifest_path =
        get_arg(args, "--manifest-path").wrap_err("Getting value of `--manifest-path`")?;
    let metadata = metadata::load(manifest_path)
        .await
        .wrap_err("Loading package metadata")?;

    let mut build = tokio::process::Command::new(&**CARGO);
    build
        .args(build_args())
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .kill_on_drop(true);
    tracing::debug!(command = ?build, "Running");
    let mut build = build
        .spawn()
        .wrap_err_with(|| format!("Running `cargo build`: {build:?}"))?;

    let stdout = build
        .stdout
        .take()
        .ok_or_else(|| eyre!("`cargo build` stdout isn't piped"))?;
    let mut lines = io::BufReader::new(stdout).lines();
    let mut tasks = Vec::new();

    let read = async {
        while let Some(line) = lines.next_line().await.wrap_err("Reading stdout")? {
            let message: cargo_metadata::Message =
                serde_json::from_str(&line).wrap_err("Parsing `cargo build`'s stdout")?;
            if let cargo_metadata::Message::CompilerArtifact(cargo_metadata::Artifact {
                executable: Some(executable),
                package_id,
                target,
                ..
            }) = message
            {
                let package = metadata
                    .packages
                    .iter()
                    .find(|p| p.id == package_id)
                    .ok_or_else(|| eyre!("Artifact of unknown package `{package_id}`"))?;
                let app = AppMetadata::from_package(package, &target.name, &DEVKITPRO)
                    .wrap_err_with(|| {
                        format!("Reading `package.metadata.n3ds` of `{}`", package.name)
                    })?;
                tasks.push(tokio::spawn(postprocess_elf(executable.into(), app)));
            }
        }
        Ok::<_, eyre::Report>(())
    }
    .await;
    if let Err(err) = read {
        stop(&mut build, &tasks).await;
        return Err(err);
    }

    let status = build.wait().await.wrap_err("Waiting for `cargo build`")?;
    handle_exit_status(status)?;

    let results = futures::future::try_join_all(tasks)
        .await
        .wrap_err("Joining on postprocessing tasks")?;
    results.into_iter().collect::<eyre::Result<Vec<()>>>()?;

    Ok(())
}

/// Kills `cargo build` and aborts the postprocessing already spawned.
async fn stop(child: &mut tokio::process::Child, tasks: &[JoinHandle<eyre::Result<()>>]) {
    for task in tasks {
        task.abort();
    }
    if let Err(error) = child.kill().await {
        tracing::warn!(%error, "Killing `cargo build`");
    }
}

fn build_args() -> [&'static str; 5] {
    [
        "build",
        "-Zbuild-std=core,alloc",
        "--target",
        TARGET,
        "--message-format=json-render-diagnostics",
    ]
}

#[tracing::instrument]
pub async fn postprocess_elf(elf: PathBuf, app: AppMetadata) -> eyre::Result<()> {
    let smdh = elf.with_extension("smdh");
    let dsx = elf.with_extension("3dsx");

    toolchain::SmdhTool::new(&app.title, &app.description, &app.author, &app.icon, &smdh)
        .run()
        .await?;

    let mut pack = toolchain::Tool3dsx::new(&elf, &dsx).with_smdh(&smdh);
    if let Some(romfs) = &app.romfs_dir {
        pack = pack.with_romfs(romfs);
    }
    pack.run().await?;

    tracing::info!(output = ?dsx, "Packed");
    Ok(())
}

/// `cargo 3ds asminc`: writes the assembler include file with the
/// function boundary macros.
#[tracing::instrument]
pub async fn asminc(args: &[String]) -> eyre::Result<()> {
    let assembler = match get_arg(args, "--assembler")? {
        Some(name) => Assembler::from_name(name)
            .ok_or_else(|| eyre!("Unknown assembler `{name}`, expected `llvm` or `gnu`"))?,
        None => Assembler::default(),
    };
    let header = asm::include_header(assembler)
        .wrap_err_with(|| format!("Rendering include header for {assembler:?}"))?
        .to_string();

    match get_arg(args, "--output")? {
        Some(path) => {
            tracing::debug!(path, "Writing include header");
            tokio::fs::write(path, header)
                .await
                .wrap_err_with(|| format!("Writing `{path}`"))?;
        }
        None => print!("{header}"),
    }

    Ok(())
}

/// Value of `name`, given as either `name value` or `name=value`.
pub fn get_arg<'a>(args: &'a [String], name: &str) -> eyre::Result<Option<&'a str>> {
    args.iter()
        .enumerate()
        .find_map(|(i, arg)| match arg.strip_prefix(name) {
            Some("") => Some(
                args.get(i + 1)
                    .map(String::as_str)
                    .ok_or_else(|| eyre!("Flag `{name}` has no value")),
            ),
            Some(a) => a.strip_prefix('=').map(Ok),
            None => None,
        })
        .transpose()
}

fn handle_exit_status(exit_status: std::process::ExitStatus) -> eyre::Result<()> {
    if !exit_status.success() {
        tracing::error!(?exit_status, "Command failed");
        eyre::bail!("Command failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(args: &[&str]) -> Vec<String> {
        args.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn get_arg_separate_value() {
        let args = args(&["--release", "--manifest-path", "hello/Cargo.toml"]);
        assert_eq!(
            get_arg(&args, "--manifest-path").unwrap(),
            Some("hello/Cargo.toml")
        );
    }

    #[test]
    fn get_arg_inline_value() {
        let args = args(&["--manifest-path=hello/Cargo.toml"]);
        assert_eq!(
            get_arg(&args, "--manifest-path").unwrap(),
            Some("hello/Cargo.toml")
        );
    }

    #[test]
    fn get_arg_missing() {
        let args = args(&["--release", "--manifest-path-extra=x"]);
        assert_eq!(get_arg(&args, "--manifest-path").unwrap(), None);
        assert_eq!(get_arg(&[], "--manifest-path").unwrap(), None);
    }

    #[test]
    fn get_arg_without_value_is_error() {
        let args = args(&["--output"]);
        assert!(get_arg(&args, "--output").is_err());
    }

    #[test]
    fn build_targets_3ds() {
        let args = build_args();
        assert_eq!(args[0], "build");
        let target = args.iter().position(|a| *a == "--target").unwrap();
        assert_eq!(args[target + 1], "armv6k-nintendo-3ds");
    }

    #[tokio::test]
    async fn asminc_writes_header() {
        let path = env::temp_dir().join(format!("cargo-3ds-asminc-{}.s", std::process::id()));
        let path_str = path.to_str().unwrap();
        asminc(&args(&["--output", path_str])).await.unwrap();

        let header = tokio::fs::read_to_string(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
        assert!(header.contains(".macro BEGIN_ASM_FUNC"));
        assert!(header.contains(".macro END_ASM_FUNC"));
    }

    #[tokio::test]
    async fn asminc_rejects_gnu() {
        let err = asminc(&args(&["--assembler", "gnu"])).await.unwrap_err();
        assert!(format!("{err:?}").contains("unsupported"), "{err:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stop_kills_build_and_aborts_tasks() {
        let mut child = tokio::process::Command::new("sleep")
            .arg("30")
            .kill_on_drop(true)
            .spawn()
            .unwrap();
        let task = tokio::spawn(futures::future::pending::<eyre::Result<()>>());

        stop(&mut child, std::slice::from_ref(&task)).await;

        assert!(child.try_wait().unwrap().is_some());
        assert!(task.await.unwrap_err().is_cancelled());
    }
}
