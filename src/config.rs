use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::Dataset;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Header names of the five fixed columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub id: String,
    pub species: String,
    pub is_type_strain: String,
    pub designation: String,
    pub strain_number: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            id: "id".to_string(),
            species: "species".to_string(),
            is_type_strain: "is_type_strain".to_string(),
            designation: "designation".to_string(),
            strain_number: "strain_number".to_string(),
        }
    }
}

impl ColumnNames {
    /// The columns every input must carry, in required schema order
    /// (`strain_number` last since it is dropped).
    pub fn required(&self) -> [&str; 5] {
        [
            self.id.as_str(),
            self.species.as_str(),
            self.is_type_strain.as_str(),
            self.designation.as_str(),
            self.strain_number.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetPaths {
    pub production: PathBuf,
    pub utilization: PathBuf,
    pub antimicrobial: PathBuf,
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self::in_dir(Path::new("metabolites"))
    }
}

impl DatasetPaths {
    /// `prod.csv`, `util.csv` and `anti.csv` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            production: dir.join("prod.csv"),
            utilization: dir.join("util.csv"),
            antimicrobial: dir.join("anti.csv"),
        }
    }

    pub fn get(&self, dataset: Dataset) -> &Path {
        match dataset {
            Dataset::Production => &self.production,
            Dataset::Utilization => &self.utilization,
            Dataset::Antimicrobial => &self.antimicrobial,
        }
    }
}

/// Everything the dashboard needs to know before loading data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub datasets: DatasetPaths,
    pub columns: ColumnNames,
    /// Length of every top-N ranking.
    pub top_n: usize,
    /// Column ranked by the "top species" analyses. Defaults to the species
    /// column when unset.
    pub ranking_column: Option<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            datasets: DatasetPaths::default(),
            columns: ColumnNames::default(),
            top_n: 10,
            ranking_column: None,
        }
    }
}

impl DashboardConfig {
    /// Read a JSON configuration file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// The configuration file if one is given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn ranking_column(&self) -> &str {
        self.ranking_column
            .as_deref()
            .unwrap_or(&self.columns.species)
    }
}
