use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use futures::stream::BoxStream;

mod fs;

pub use fs::FsTraversal;

pub type WalkStream = BoxStream<'static, Result<WalkBatch, WalkError>>;

// NOTE: two batches per directory, subdirectories then everything else. No
// directory is read before the next poll. The stream ends after an `Err`.
pub trait Traversal: Send + Sync {
    fn walk(&self, root: &Path, options: WalkOptions) -> WalkStream;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WalkOptions {
    pub follow_links: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BatchKind {
    Directories,
    Files,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkBatch {
    pub root: PathBuf,
    pub kind: BatchKind,
    pub records: Vec<WalkRecord>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RecordKind {
    Directory,
    File,
    SymbolicLink,
    Other,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkRecord {
    pub name: OsString,
    pub kind: RecordKind,
    pub size: u64,
    pub accessed: SystemTime,
}

impl WalkRecord {
    pub fn is_directory(&self) -> bool {
        self.kind == RecordKind::Directory
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("Reading directory {0:?} failed")]
    ReadDirectory(PathBuf, #[source] io::Error),
    #[error("Reading metadata of {0:?} failed")]
    Metadata(PathBuf, #[source] io::Error),
}

impl WalkError {
    pub fn path(&self) -> &Path {
        match self {
            WalkError::ReadDirectory(path, _) | WalkError::Metadata(path, _) => path,
        }
    }

    pub fn kind(&self) -> io::ErrorKind {
        match self {
            WalkError::ReadDirectory(_, error) | WalkError::Metadata(_, error) => error.kind(),
        }
    }
}
