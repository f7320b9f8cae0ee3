// File: ./src/output.rs
//! Writing rendered snapshots where the host picks them up.
use crate::render::RenderedArtifact;
use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

/// `file_path` with `suffix` appended to its full extension
/// (`todo.png` -> `todo.png.<suffix>`).
fn sidecar_path(file_path: &Path, suffix: &str) -> PathBuf {
    let mut path = file_path.to_path_buf();
    if let Some(ext) = path.extension() {
        let mut new_ext = ext.to_os_string();
        new_ext.push(".");
        new_ext.push(suffix);
        path.set_extension(new_ext);
    } else {
        path.set_extension(suffix);
    }
    path
}

/// Sidecar lock file next to `file_path` (`todo.png` -> `todo.png.lock`).
fn get_lock_path(file_path: &Path) -> PathBuf {
    sidecar_path(file_path, "lock")
}

/// Staging file for `atomic_write`. Unique per target, so `todo.png` and
/// `todo.html` never share one.
fn get_tmp_path(file_path: &Path) -> PathBuf {
    sidecar_path(file_path, "tmp")
}

/// Runs `f` while holding an exclusive advisory lock for `file_path`.
pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let lock_path = get_lock_path(file_path);
    let file = fs::OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("Failed to open lock file {:?}", lock_path))?;

    file.lock_exclusive()?;
    let result = f();
    file.unlock()?;
    result
}

/// Atomic write: write to a sibling `<name>.tmp` file, then rename over `path`.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = get_tmp_path(path);
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}

/// Encodes `artifact` and stores it at `path`, creating parent directories.
pub fn write_artifact(path: &Path, artifact: &RenderedArtifact) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let bytes = artifact.encode()?;
    with_lock(path, || atomic_write(path, &bytes))
        .with_context(|| format!("Failed to write snapshot to {:?}", path))?;
    log::debug!("Wrote {} bytes to {:?}", bytes.len(), path);
    Ok(())
}
