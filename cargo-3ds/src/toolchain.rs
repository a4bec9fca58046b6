use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use eyre::WrapErr;
use once_cell::sync::Lazy;

use crate::{handle_exit_status, DEVKITPRO};

#[tracing::instrument(parent = None)]
fn get_devkitpro_subpath(subpath: &Path) -> PathBuf {
    let path = DEVKITPRO.join(subpath);
    tracing::debug!(?path);
    path
}

static TOOL_3DSX: Lazy<PathBuf> =
    Lazy::new(|| get_devkitpro_subpath("tools/bin/3dsxtool".as_ref()));
static SMDHTOOL: Lazy<PathBuf> =
    Lazy::new(|| get_devkitpro_subpath("tools/bin/smdhtool".as_ref()));

/// `smdhtool --create`: icon and title metadata shown by the homebrew
/// launcher.
#[derive(Clone, Debug)]
pub struct SmdhTool<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub author: &'a str,
    /// 48x48 png
    pub icon: &'a Path,
    pub output_smdh: &'a Path,
}

impl<'a> SmdhTool<'a> {
    pub fn new(
        title: &'a str,
        description: &'a str,
        author: &'a str,
        icon: &'a Path,
        output_smdh: &'a Path,
    ) -> Self {
        SmdhTool {
            title,
            description,
            author,
            icon,
            output_smdh,
        }
    }

    fn command(&self, program: &Path) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(program);
        command
            .arg("--create")
            .args([self.title, self.description, self.author])
            .args([self.icon, self.output_smdh]);
        command
    }

    #[tracing::instrument]
    pub async fn run(&self) -> eyre::Result<()> {
        let mut command = self.command(&SMDHTOOL);

        tracing::debug!(?command, "Running");
        let status = command.status().await.wrap_err("Running `smdhtool`")?;

        handle_exit_status(status)?;

        Ok(())
    }
}

/// `3dsxtool`: converts the linked ELF into a `.3dsx`.
#[derive(Clone, Debug)]
pub struct Tool3dsx<'a> {
    pub input_elf: &'a Path,
    pub output_3dsx: &'a Path,
    pub smdh: Option<&'a Path>,
    /// directory embedded as the read-only romfs
    pub romfs: Option<&'a Path>,
}

impl<'a> Tool3dsx<'a> {
    pub fn new(input_elf: &'a Path, output_3dsx: &'a Path) -> Self {
        Tool3dsx {
            input_elf,
            output_3dsx,
            smdh: None,
            romfs: None,
        }
    }

    pub fn with_smdh(mut self, smdh: &'a Path) -> Self {
        self.smdh = Some(smdh);
        self
    }

    pub fn with_romfs(mut self, romfs: &'a Path) -> Self {
        self.romfs = Some(romfs);
        self
    }

    fn command(&self, program: &Path) -> tokio::process::Command {
        let mut command = tokio::process::Command::new(program);
        command.args([self.input_elf, self.output_3dsx]);

        if let Some(smdh) = self.smdh {
            let mut arg = OsString::from("--smdh=");
            arg.push(smdh);
            command.arg(arg);
        }
        if let Some(romfs) = self.romfs {
            let mut arg = OsString::from("--romfs=");
            arg.push(romfs);
            command.arg(arg);
        }
        command
    }

    #[tracing::instrument]
    pub async fn run(&self) -> eyre::Result<()> {
        let mut command = self.command(&TOOL_3DSX);

        tracing::debug!(?command, "Running");
        let status = command.status().await.wrap_err("Running `3dsxtool`")?;

        handle_exit_status(status)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use super::*;

    fn args(command: &tokio::process::Command) -> Vec<&OsStr> {
        command.as_std().get_args().collect()
    }

    #[test]
    fn smdhtool_args() {
        let tool = SmdhTool::new(
            "Hello World",
            "Homebrew Application",
            "someone",
            Path::new("icon.png"),
            Path::new("target/hello.smdh"),
        );
        let command = tool.command(Path::new("smdhtool"));
        assert_eq!(
            args(&command),
            [
                "--create",
                "Hello World",
                "Homebrew Application",
                "someone",
                "icon.png",
                "target/hello.smdh"
            ]
        );
    }

    #[test]
    fn tool_3dsx_args() {
        let tool = Tool3dsx::new(Path::new("hello.elf"), Path::new("hello.3dsx"));
        assert_eq!(args(&tool.command(Path::new("3dsxtool"))), ["hello.elf", "hello.3dsx"]);

        let tool = tool
            .with_smdh(Path::new("hello.smdh"))
            .with_romfs(Path::new("romfs"));
        assert_eq!(
            args(&tool.command(Path::new("3dsxtool"))),
            ["hello.elf", "hello.3dsx", "--smdh=hello.smdh", "--romfs=romfs"]
        );
    }
}
