use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use futures::StreamExt;
use yard_index::Entry;
use yard_walk::{BatchKind, Traversal, WalkOptions, WalkRecord};

use crate::error::ScanError;

use super::{normalize_path, BinState, ScanSummary, SharedIndex, StateCell};

#[derive(Debug)]
pub struct PhysicalBin {
    pub id: usize,
    pub name: String,
    pub path: PathBuf,
    index: SharedIndex,
    state: StateCell,
}

impl PhysicalBin {
    pub(crate) fn new(id: usize, path: &Path, index: SharedIndex) -> Self {
        let path = normalize_path(path);
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => path.to_string_lossy().to_string(),
        };

        Self {
            id,
            name,
            path,
            index,
            state: StateCell::default(),
        }
    }

    pub fn state(&self) -> BinState {
        self.state.get()
    }

    #[tracing::instrument(skip(self, traversal), fields(path = ?self.path))]
    pub async fn scan(&self, traversal: &dyn Traversal) -> Result<ScanSummary, ScanError> {
        let _guard = self
            .state
            .begin_scan()
            .map_err(|state| ScanError::InvalidState {
                bin: self.path.to_string_lossy().to_string(),
                state,
            })?;

        let removed = self.index.write().await.remove_bin(self.id);
        if removed > 0 {
            tracing::debug!("removed {} entries of previous scan", removed);
        }

        let mut summary = ScanSummary::default();
        let mut batches = traversal.walk(&self.path, WalkOptions { follow_links: false });
        while let Some(batch) = batches.next().await {
            let batch = match batch {
                Ok(batch) => batch,
                Err(error) => {
                    tracing::error!("scan failed after {}: {:?}", summary, error);
                    return Err(ScanError::Traversal(error));
                }
            };

            let entries: Vec<_> = batch
                .records
                .iter()
                .map(|record| Arc::new(self.to_entry(&batch.root, record)))
                .collect();

            match batch.kind {
                BatchKind::Directories => summary.directories += entries.len(),
                BatchKind::Files => summary.files += entries.len(),
            }

            let mut index = self.index.write().await;
            for entry in entries {
                index.add(entry);
            }
        }

        tracing::info!("scan finished with {}", summary);

        Ok(summary)
    }

    fn to_entry(&self, root: &Path, record: &WalkRecord) -> Entry {
        let path = root.join(&record.name);
        let relative_path = match pathdiff::diff_paths(&path, &self.path) {
            Some(relative) => relative,
            None => path.clone(),
        };

        if record.is_directory() {
            Entry::directory(self.id, path, relative_path, record.accessed)
        } else {
            Entry::file(self.id, path, relative_path, record.size, record.accessed)
        }
    }
}
