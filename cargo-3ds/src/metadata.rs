//! `[package.metadata.n3ds]` of the packages being built.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
};

use camino::{Utf8Path, Utf8PathBuf};
use eyre::{eyre, WrapErr};
use serde::Deserialize;

use crate::{handle_exit_status, CARGO};

pub const DEFAULT_DESCRIPTION: &str = "Homebrew Application";
pub const DEFAULT_AUTHOR: &str = "Unspecified Author";

/// Runs `cargo metadata` for the workspace members.
#[tracing::instrument]
pub async fn load(manifest_path: Option<&str>) -> eyre::Result<cargo_metadata::Metadata> {
    let mut command = tokio::process::Command::new(&**CARGO);
    command
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .stderr(Stdio::inherit())
        .stdin(Stdio::null());

    if let Some(manifest_path) = manifest_path {
        command.args(["--manifest-path", manifest_path]);
    }

    tracing::debug!(?command, "Running");
    let output = command
        .output()
        .await
        .wrap_err("Running `cargo metadata`")?;
    handle_exit_status(output.status)?;

    serde_json::from_slice(&output.stdout).wrap_err("Parsing `cargo metadata`'s stdout")
}

/// The table as written in the manifest.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "kebab-case")]
pub struct N3dsMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    /// 48x48 png, relative to the manifest directory
    pub icon: Option<Utf8PathBuf>,
    pub romfs_dir: Option<Utf8PathBuf>,
}

/// Everything needed to pack one executable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppMetadata {
    pub title: String,
    pub description: String,
    pub author: String,
    pub icon: PathBuf,
    pub romfs_dir: Option<PathBuf>,
}

impl AppMetadata {
    pub fn from_package(
        package: &cargo_metadata::Package,
        binary: &str,
        devkitpro: &Path,
    ) -> eyre::Result<Self> {
        let manifest_dir = package
            .manifest_path
            .parent()
            .ok_or_else(|| eyre!("Manifest path `{}` has no parent", package.manifest_path))?;
        AppMetadata::from_value(&package.metadata, manifest_dir, binary, devkitpro)
    }

    /// `metadata` is the whole `package.metadata` table.
    pub fn from_value(
        metadata: &serde_json::Value,
        manifest_dir: &Utf8Path,
        binary: &str,
        devkitpro: &Path,
    ) -> eyre::Result<Self> {
        let n3ds = match metadata.get("n3ds") {
            Some(value) => N3dsMetadata::deserialize(value).wrap_err("Deserializing")?,
            None => N3dsMetadata::default(),
        };
        tracing::debug!(?n3ds, binary);

        let icon = match n3ds.icon {
            Some(icon) => manifest_dir.join(icon).into_std_path_buf(),
            None => devkitpro.join("libctru/default_icon.png"),
        };

        Ok(AppMetadata {
            title: n3ds.title.unwrap_or_else(|| binary.to_owned()),
            description: n3ds
                .description
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_owned()),
            author: n3ds.author.unwrap_or_else(|| DEFAULT_AUTHOR.to_owned()),
            icon,
            romfs_dir: n3ds
                .romfs_dir
                .map(|dir| manifest_dir.join(dir).into_std_path_buf()),
        })
    }
}
