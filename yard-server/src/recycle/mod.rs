use std::{
    fmt::Display,
    ops::AddAssign,
    path::{Component, Path, PathBuf},
    sync::{
        atomic::{AtomicU8, Ordering},
        Arc,
    },
};

use serde::Serialize;
use tokio::sync::RwLock;
use yard_index::EntryIndex;

pub use pbin::PhysicalBin;
pub use vbin::VirtualBin;

mod pbin;
mod vbin;

pub type SharedIndex = Arc<RwLock<EntryIndex>>;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub enum BinState {
    #[default]
    Normal,
    Scanning,
    // NOTE: reserved for removing files from bins, scans never enter it
    Cleaning,
}

impl From<u8> for BinState {
    fn from(value: u8) -> Self {
        match value {
            1 => BinState::Scanning,
            2 => BinState::Cleaning,
            _ => BinState::Normal,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct StateCell(AtomicU8);

impl StateCell {
    pub fn get(&self) -> BinState {
        BinState::from(self.0.load(Ordering::Acquire))
    }

    // NOTE: the guard resets to normal on drop
    pub fn begin_scan(&self) -> Result<ScanGuard<'_>, BinState> {
        self.0
            .compare_exchange(
                BinState::Normal as u8,
                BinState::Scanning as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ScanGuard(self))
            .map_err(BinState::from)
    }
}

pub(crate) struct ScanGuard<'a>(&'a StateCell);

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        self.0 .0.store(BinState::Normal as u8, Ordering::Release);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ScanSummary {
    pub directories: usize,
    pub files: usize,
}

impl AddAssign for ScanSummary {
    fn add_assign(&mut self, other: Self) {
        self.directories += other.directories;
        self.files += other.files;
    }
}

impl Display for ScanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} directories, {} files", self.directories, self.files)
    }
}

pub(crate) fn normalize_path(path: &Path) -> PathBuf {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(current) => current.join(path),
            Err(error) => {
                tracing::warn!("resolving current directory failed: {:?}", error);
                path.to_path_buf()
            }
        }
    };

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            component => normalized.push(component),
        }
    }

    normalized
}
