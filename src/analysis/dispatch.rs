use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::aggregate::{sum_metabolites, MetaboliteSums};
use super::rank::{top_categorical_counts, top_metabolites};
use super::stats::{compute_statistics, SummaryTable};
use super::SchemaError;
use crate::data::filter::TypeStrainFilter;
use crate::data::model::Dataset;
use crate::session::Session;

pub const STATISTICS_HEADING: &str = "Broad Statistics for Type and Non-Type Strains";

// ---------------------------------------------------------------------------
// Actions – the nine analysis buttons
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AnalysisKind {
    MetaboliteCount,
    TopSpecies,
    TopMetabolites,
}

impl AnalysisKind {
    const ALL: [AnalysisKind; 3] = [
        AnalysisKind::MetaboliteCount,
        AnalysisKind::TopSpecies,
        AnalysisKind::TopMetabolites,
    ];

    fn suffix(self) -> &'static str {
        match self {
            AnalysisKind::MetaboliteCount => "count",
            AnalysisKind::TopSpecies => "species",
            AnalysisKind::TopMetabolites => "metabolites",
        }
    }
}

/// One analysis button. Ordering is button order: all counts, then all
/// species rankings, then all metabolite rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Action {
    pub kind: AnalysisKind,
    pub dataset: Dataset,
}

impl Action {
    pub fn new(dataset: Dataset, kind: AnalysisKind) -> Self {
        Self { kind, dataset }
    }

    /// All nine actions in button order.
    pub fn all() -> Vec<Action> {
        AnalysisKind::ALL
            .iter()
            .flat_map(|&kind| Dataset::ALL.iter().map(move |&dataset| Action::new(dataset, kind)))
            .collect()
    }

    pub fn button_label(&self, top_n: usize) -> String {
        match self.kind {
            AnalysisKind::MetaboliteCount => format!("Show {} Metabolite Count", self.dataset),
            AnalysisKind::TopSpecies => format!("Show Top {top_n} {} Species", self.dataset),
            AnalysisKind::TopMetabolites => {
                format!("Show Top {top_n} {} Metabolites", self.dataset)
            }
        }
    }

    pub fn heading(&self, top_n: usize) -> String {
        match (self.kind, self.dataset) {
            (AnalysisKind::MetaboliteCount, ds) => format!("Total {ds} Metabolite Count"),
            (AnalysisKind::TopSpecies, Dataset::Production) => {
                format!("Top {top_n} Species Producing Metabolites")
            }
            (AnalysisKind::TopSpecies, Dataset::Utilization) => {
                format!("Top {top_n} Species Utilizing Metabolites")
            }
            (AnalysisKind::TopSpecies, Dataset::Antimicrobial) => {
                format!("Top {top_n} Species with Antimicrobial Metabolites")
            }
            (AnalysisKind::TopMetabolites, ds) => format!("Top {top_n} {ds} Metabolites"),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.dataset.short_name(), self.kind.suffix())
    }
}

impl FromStr for Action {
    type Err = String;

    /// Parse names like `prod-count`, `util-species` or `anti-metabolites`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::all()
            .into_iter()
            .find(|a| a.to_string() == s.trim().to_ascii_lowercase())
            .ok_or_else(|| {
                let names: Vec<String> = Action::all().iter().map(|a| a.to_string()).collect();
                format!("unknown action '{s}', expected one of: {}", names.join(", "))
            })
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "rows", rename_all = "snake_case")]
pub enum Payload {
    Summary(SummaryTable),
    Sums(MetaboliteSums),
    Counts {
        column: String,
        entries: Vec<(String, usize)>,
    },
    Ranking(Vec<(String, f64)>),
}

/// A heading plus whatever table it labels; what the shell renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// The button that produced this result; `None` for the statistics table.
    pub action: Option<Action>,
    pub heading: String,
    pub payload: Payload,
}

/// The always-visible statistics table over the unfiltered datasets.
pub fn broad_statistics(session: &Session) -> Result<AnalysisResult, SchemaError> {
    let stats = compute_statistics(
        session.table(Dataset::Production),
        session.table(Dataset::Utilization),
        session.table(Dataset::Antimicrobial),
    )?;
    Ok(AnalysisResult {
        action: None,
        heading: STATISTICS_HEADING.to_string(),
        payload: Payload::Summary(stats),
    })
}

/// Evaluate one button press under the current checkbox state. The dataset is
/// filtered on its own indicator column.
pub fn run_action(
    session: &Session,
    filter: &TypeStrainFilter,
    action: Action,
) -> Result<AnalysisResult, SchemaError> {
    log::debug!("running {action} with {filter:?}");
    let top_n = session.config.top_n;
    let table = filter.apply(session.table(action.dataset));

    let payload = match action.kind {
        AnalysisKind::MetaboliteCount => Payload::Sums(sum_metabolites(&table)),
        AnalysisKind::TopSpecies => {
            let column = session.config.ranking_column();
            Payload::Counts {
                column: column.to_string(),
                entries: top_categorical_counts(&table, column, top_n)?,
            }
        }
        AnalysisKind::TopMetabolites => Payload::Ranking(top_metabolites(&table, top_n)),
    };

    Ok(AnalysisResult {
        action: Some(action),
        heading: action.heading(top_n),
        payload,
    })
}

/// Everything one render pass shows: the statistics table, then one result
/// per active action in the order given.
pub fn evaluate(
    session: &Session,
    filter: &TypeStrainFilter,
    actions: &[Action],
) -> Result<Vec<AnalysisResult>, SchemaError> {
    let mut results = vec![broad_statistics(session)?];
    for &action in actions {
        results.push(run_action(session, filter, action)?);
    }
    Ok(results)
}
