//! Temp-file-and-rename writes inside a capability directory.
//!
//! Readers of a slot either see the previous contents or the new contents,
//! never a prefix of the new ones.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` in `dir` with `contents` in one rename.
pub(super) fn write_atomic(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let tmp_name = format!(".{file_name}.tmp.{}.{counter}", std::process::id());

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let written = dir.open_with(&tmp_name, &options).and_then(|mut file| {
        file.write_all(contents)?;
        file.sync_all()
    });
    if let Err(err) = written.and_then(|()| replace(dir, &tmp_name, file_name)) {
        drop(dir.remove_file(&tmp_name));
        return Err(err);
    }

    // Directory sync is best effort; the rename already happened.
    drop(dir.open(".").and_then(|parent| parent.sync_all()));
    Ok(())
}

/// Remove `file_name`, treating a missing file as success.
pub(super) fn remove_if_present(dir: &Dir, file_name: &str) -> io::Result<()> {
    match dir.remove_file(file_name) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err),
    }
}

/// Read `file_name`, `None` when it does not exist.
pub(super) fn read_if_present(dir: &Dir, file_name: &str) -> io::Result<Option<Vec<u8>>> {
    match dir.read(file_name) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    remove_if_present(dir, target_name)?;
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}
