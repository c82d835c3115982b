use std::sync::Arc;

use yard_walk::Traversal;

use crate::{
    config::Config,
    error::ScanError,
    recycle::{ScanSummary, VirtualBin},
};

pub struct Manager {
    traversal: Arc<dyn Traversal>,
    virtual_bins: Vec<VirtualBin>,
}

impl Manager {
    pub fn new(config: &Config, traversal: Arc<dyn Traversal>) -> Self {
        let mut virtual_bins = Vec::new();
        for (id, bin_config) in config.recycle_bins.iter().enumerate() {
            let mut bin = VirtualBin::new(id, &bin_config.name);
            for path in &bin_config.recycle_folder_paths {
                bin.add_physical_bin(path);
            }

            tracing::debug!(
                "created virtual bin {:?} with {} physical bins",
                bin.name,
                bin.physical_bins().len()
            );

            virtual_bins.push(bin);
        }

        Self {
            traversal,
            virtual_bins,
        }
    }

    pub fn virtual_bins(&self) -> &[VirtualBin] {
        &self.virtual_bins
    }

    pub fn virtual_bin(&self, id: usize) -> Option<&VirtualBin> {
        self.virtual_bins.get(id)
    }

    pub async fn start(&self) -> Result<ScanSummary, ScanError> {
        tracing::info!("scanning {} virtual bins", self.virtual_bins.len());

        let mut summary = ScanSummary::default();
        for bin in &self.virtual_bins {
            summary += bin.scan(self.traversal.as_ref()).await?;
        }

        tracing::info!("scanned all virtual bins: {}", summary);

        Ok(summary)
    }
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("virtual_bins", &self.virtual_bins)
            .finish_non_exhaustive()
    }
}
