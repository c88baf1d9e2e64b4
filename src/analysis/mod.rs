/// Analysis layer: everything computed from loaded tables.
///
/// ```text
///   Session (prod, util, anti)
///        │
///        ├──────────────► stats      broad statistics, unfiltered
///        │
///        ▼
///   TypeStrainFilter ───► aggregate  per-metabolite sums
///                   └───► rank       top species / top metabolites
///
///   dispatch: (filter, action) → AnalysisResult
/// ```
use thiserror::Error;

use crate::data::model::Dataset;

pub mod aggregate;
pub mod dispatch;
pub mod rank;
pub mod stats;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("{dataset} has {found} rows but Production has {expected}; rows are matched by position")]
    RowCountMismatch {
        dataset: Dataset,
        expected: usize,
        found: usize,
    },
    #[error("no column named '{0}'")]
    UnknownColumn(String),
}
