use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::domain::dataset::Dataset;
use crate::services::simulation_types::SimulationResult;

/// Holds the latest uploaded dataset and the latest simulation results.
///
/// Each slot is replaced by swapping an `Arc` under a short write lock, so a
/// reader always gets a complete snapshot, either the old one or the new one.
/// The two slots are independent: publishing a dataset does not clear results.
#[derive(Debug, Default)]
pub struct SessionState {
    dataset: RwLock<Option<Arc<Dataset>>>,
    results: RwLock<Arc<Vec<SimulationResult>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish_dataset(&self, dataset: Dataset) -> Arc<Dataset> {
        let dataset = Arc::new(dataset);
        info!(
            orders = dataset.total_records(),
            columns = dataset.columns().len(),
            "dataset published"
        );
        *self.dataset.write() = Some(Arc::clone(&dataset));
        dataset
    }

    pub fn latest_dataset(&self) -> Option<Arc<Dataset>> {
        self.dataset.read().clone()
    }

    pub fn publish_results(&self, results: Vec<SimulationResult>) -> Arc<Vec<SimulationResult>> {
        let results = Arc::new(results);
        *self.results.write() = Arc::clone(&results);
        results
    }

    /// Empty until the first successful simulation run.
    pub fn latest_results(&self) -> Arc<Vec<SimulationResult>> {
        Arc::clone(&self.results.read())
    }
}
