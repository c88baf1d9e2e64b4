use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::loader::{load_file, LoadError};
use crate::data::model::{Dataset, RecordTable};

// ---------------------------------------------------------------------------
// Session – the three loaded datasets plus the settings they were loaded with
// ---------------------------------------------------------------------------

/// Read-only context handed to every analysis. Tables are behind `Arc` so a
/// session can be cloned into the GUI and the report without copying rows.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: DashboardConfig,
    production: Arc<RecordTable>,
    utilization: Arc<RecordTable>,
    antimicrobial: Arc<RecordTable>,
}

impl Session {
    /// Load all three datasets named by `config`. Any failure aborts the
    /// whole session, since every analysis needs all three.
    pub fn load(config: DashboardConfig) -> Result<Self, LoadError> {
        let load = |dataset: Dataset| load_file(config.datasets.get(dataset), &config.columns);
        let production = load(Dataset::Production)?;
        let utilization = load(Dataset::Utilization)?;
        let antimicrobial = load(Dataset::Antimicrobial)?;
        Ok(Self::from_tables(config, production, utilization, antimicrobial))
    }

    pub fn from_tables(
        config: DashboardConfig,
        production: RecordTable,
        utilization: RecordTable,
        antimicrobial: RecordTable,
    ) -> Self {
        Self {
            config,
            production: Arc::new(production),
            utilization: Arc::new(utilization),
            antimicrobial: Arc::new(antimicrobial),
        }
    }

    pub fn table(&self, dataset: Dataset) -> &RecordTable {
        match dataset {
            Dataset::Production => &self.production,
            Dataset::Utilization => &self.utilization,
            Dataset::Antimicrobial => &self.antimicrobial,
        }
    }
}
