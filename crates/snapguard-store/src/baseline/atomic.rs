//! Atomic write primitives
//!
//! Temp file in the same directory, every byte accounted for, fsync, then
//! rename over the target. A reader sees the old baseline or the new one,
//! never a prefix.

use crate::errors::{io_error, Result};
use snapguard_core::errors::SgErrorKind;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Write all of `bytes`, counting as we go.
///
/// `Interrupted` is retried. A write that accepts zero bytes fails with
/// `WriteZero` and a message giving how far it got.
pub(crate) fn write_fully<W: Write>(writer: &mut W, bytes: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < bytes.len() {
        match writer.write(&bytes[written..]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    format!("wrote {} of {} bytes", written, bytes.len()),
                ))
            }
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(written)
}

/// Sibling scratch path: `<target>.tmp`
pub(crate) fn temp_path_for(target: &Path) -> PathBuf {
    let mut name = target.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    target.with_file_name(name)
}

/// Atomically replace `target_path` with `content`
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| io_error(SgErrorKind::CreateDir, "create_store_dir", parent, e))?;
    }

    let temp_path = temp_path_for(target_path);
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| io_error(SgErrorKind::OpenForWrite, "open_baseline_temp", &temp_path, e))?;

    if let Err(err) = write_and_sync(&mut file, content, &temp_path) {
        drop(file);
        let _ = fs::remove_file(&temp_path);
        return Err(err);
    }
    drop(file);

    fs::rename(&temp_path, target_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        io_error(SgErrorKind::OpenForWrite, "rename_baseline_temp", target_path, e)
    })
}

fn write_and_sync(file: &mut File, content: &[u8], temp_path: &Path) -> Result<()> {
    write_fully(file, content)
        .map_err(|e| io_error(SgErrorKind::ShortWrite, "write_baseline_temp", temp_path, e))?;
    file.sync_all()
        .map_err(|e| io_error(SgErrorKind::ShortWrite, "sync_baseline_temp", temp_path, e))
}
