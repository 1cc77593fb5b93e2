//! File-backed stores for the credential pair and collection snapshots.
//!
//! Every slot is one JSON file inside a state directory opened through
//! `cap_std`, so the stores can only touch files beneath it.

mod atomic_io;
mod credential_store;
mod snapshot_store;

use std::io;
use std::sync::Arc;

use camino::Utf8Path;
use cap_std::{ambient_authority, fs::Dir};

pub use credential_store::FileCredentialStore;
pub use snapshot_store::FileSnapshotStore;

/// File name of the credential slot pair.
pub const CREDENTIAL_FILE: &str = "credential.json";
/// File name of the product snapshot.
pub const PRODUCTS_FILE: &str = "products.json";

/// Capability handle on the client's state directory.
#[derive(Debug, Clone)]
pub struct StateDir {
    dir: Arc<Dir>,
}

impl StateDir {
    /// Open `path`, creating it (and its parents) when missing.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be created
    /// or opened.
    pub fn open_or_create(path: &Utf8Path) -> io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self { dir: Arc::new(dir) })
    }

    pub(crate) fn dir(&self) -> &Dir {
        &self.dir
    }
}
