use std::{
    collections::VecDeque,
    fs::Metadata,
    io,
    path::{Path, PathBuf},
    time::SystemTime,
};

use futures::{stream, StreamExt};
use tokio::fs::{self, DirEntry};

use crate::{
    BatchKind, RecordKind, Traversal, WalkBatch, WalkError, WalkOptions, WalkRecord, WalkStream,
};

#[derive(Clone, Debug, Default)]
pub struct FsTraversal;

struct WalkState {
    directories: Vec<PathBuf>,
    failed: bool,
    options: WalkOptions,
    pending: VecDeque<WalkBatch>,
}

impl Traversal for FsTraversal {
    fn walk(&self, root: &Path, options: WalkOptions) -> WalkStream {
        tracing::debug!("walking {:?} with {:?}", root, options);

        let state = WalkState {
            directories: vec![root.to_path_buf()],
            failed: false,
            options,
            pending: VecDeque::new(),
        };

        stream::unfold(state, |mut state| async move {
            loop {
                if state.failed {
                    return None;
                }

                if let Some(batch) = state.pending.pop_front() {
                    return Some((Ok(batch), state));
                }

                let directory = state.directories.pop()?;
                match read_directory(&directory, &state.options).await {
                    Ok((directories, files)) => {
                        // NOTE: reversed so the lexically first subdirectory is visited next
                        for record in directories.iter().rev() {
                            state.directories.push(directory.join(&record.name));
                        }

                        state.pending.push_back(WalkBatch {
                            root: directory.clone(),
                            kind: BatchKind::Directories,
                            records: directories,
                        });
                        state.pending.push_back(WalkBatch {
                            root: directory,
                            kind: BatchKind::Files,
                            records: files,
                        });
                    }
                    Err(error) => {
                        tracing::warn!("walk stopped: {:?}", error);

                        state.failed = true;
                        return Some((Err(error), state));
                    }
                }
            }
        })
        .boxed()
    }
}

async fn read_directory(
    path: &Path,
    options: &WalkOptions,
) -> Result<(Vec<WalkRecord>, Vec<WalkRecord>), WalkError> {
    tracing::trace!("reading directory {:?}", path);

    let mut read_dir = fs::read_dir(path)
        .await
        .map_err(|error| WalkError::ReadDirectory(path.to_path_buf(), error))?;

    let mut directories = Vec::new();
    let mut files = Vec::new();
    loop {
        let entry = match read_dir.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(error) => return Err(WalkError::ReadDirectory(path.to_path_buf(), error)),
        };

        let metadata = get_metadata(&entry, options)
            .await
            .map_err(|error| WalkError::Metadata(entry.path(), error))?;

        let record = to_record(&entry, &metadata);
        if record.is_directory() {
            directories.push(record);
        } else {
            files.push(record);
        }
    }

    directories.sort_unstable_by(|a, b| a.name.cmp(&b.name));
    files.sort_unstable_by(|a, b| a.name.cmp(&b.name));

    Ok((directories, files))
}

async fn get_metadata(entry: &DirEntry, options: &WalkOptions) -> io::Result<Metadata> {
    if !options.follow_links {
        return entry.metadata().await;
    }

    match fs::metadata(entry.path()).await {
        Ok(metadata) => Ok(metadata),
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("dangling link {:?}", entry.path());
            entry.metadata().await
        }
        Err(error) => Err(error),
    }
}

fn to_record(entry: &DirEntry, metadata: &Metadata) -> WalkRecord {
    let file_type = metadata.file_type();
    let kind = if file_type.is_dir() {
        RecordKind::Directory
    } else if file_type.is_file() {
        RecordKind::File
    } else if file_type.is_symlink() {
        RecordKind::SymbolicLink
    } else {
        RecordKind::Other
    };

    let size = if kind == RecordKind::Directory {
        0
    } else {
        metadata.len()
    };

    let accessed = metadata
        .accessed()
        .or_else(|_| metadata.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH);

    WalkRecord {
        name: entry.file_name(),
        kind,
        size,
        accessed,
    }
}
