use std::{path::Path, sync::Arc};

use tokio::sync::RwLock;
use yard_index::EntryIndex;
use yard_walk::Traversal;

use crate::error::ScanError;

use super::{BinState, PhysicalBin, ScanSummary, SharedIndex, StateCell};

#[derive(Debug)]
pub struct VirtualBin {
    pub id: usize,
    pub name: String,
    index: SharedIndex,
    physical_bins: Vec<PhysicalBin>,
    state: StateCell,
}

impl VirtualBin {
    pub fn new(id: usize, name: &str) -> Self {
        Self {
            id,
            name: name.to_owned(),
            index: Arc::new(RwLock::new(EntryIndex::default())),
            physical_bins: Vec::new(),
            state: StateCell::default(),
        }
    }

    pub fn add_physical_bin(&mut self, path: &Path) -> &PhysicalBin {
        let id = self.physical_bins.len();
        self.physical_bins
            .push(PhysicalBin::new(id, path, self.index.clone()));

        &self.physical_bins[id]
    }

    pub fn physical_bins(&self) -> &[PhysicalBin] {
        &self.physical_bins
    }

    pub fn physical_bin(&self, id: usize) -> Option<&PhysicalBin> {
        self.physical_bins.get(id)
    }

    pub fn index(&self) -> &RwLock<EntryIndex> {
        &self.index
    }

    pub fn state(&self) -> BinState {
        self.state.get()
    }

    #[tracing::instrument(skip(self, traversal), fields(name = %self.name))]
    pub async fn scan(&self, traversal: &dyn Traversal) -> Result<ScanSummary, ScanError> {
        let _guard = self
            .state
            .begin_scan()
            .map_err(|state| ScanError::InvalidState {
                bin: self.name.clone(),
                state,
            })?;

        let mut summary = ScanSummary::default();
        for bin in &self.physical_bins {
            match bin.scan(traversal).await {
                Ok(bin_summary) => summary += bin_summary,
                Err(error) => {
                    tracing::error!("scanning {:?} failed: {:?}", bin.path, error);
                    return Err(error);
                }
            }
        }

        tracing::info!("scanned {} physical bins: {}", self.physical_bins.len(), summary);

        Ok(summary)
    }
}
