use std::fmt;

use serde::Serialize;

use crate::analysis::dispatch::{AnalysisResult, Payload};
use crate::analysis::stats::SUMMARY_COLUMNS;
use crate::data::filter::TypeStrainFilter;

// ---------------------------------------------------------------------------
// Tabular – any payload flattened to header + text rows
// ---------------------------------------------------------------------------

/// A payload as plain text cells. Both the GUI tables and the text report
/// draw from this.
#[derive(Debug, Clone, PartialEq)]
pub struct Tabular {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Tabular {
    pub fn from_payload(payload: &Payload) -> Self {
        match payload {
            Payload::Summary(stats) => Self {
                columns: SUMMARY_COLUMNS.iter().map(|c| c.to_string()).collect(),
                rows: stats.rows.iter().map(|r| r.cells().to_vec()).collect(),
            },
            Payload::Sums(sums) => Self {
                columns: vec!["Metabolite".to_string(), "Count".to_string()],
                rows: sums
                    .iter()
                    .map(|(name, v)| vec![name.clone(), v.to_string()])
                    .collect(),
            },
            Payload::Counts { column, entries } => Self {
                columns: vec![column.clone(), "Count".to_string()],
                rows: entries
                    .iter()
                    .map(|(value, n)| vec![value.clone(), n.to_string()])
                    .collect(),
            },
            Payload::Ranking(entries) => Self {
                columns: vec!["Metabolite".to_string(), "Total".to_string()],
                rows: entries
                    .iter()
                    .map(|(name, v)| vec![name.clone(), v.to_string()])
                    .collect(),
            },
        }
    }
}

impl fmt::Display for Tabular {
    /// Left-aligned first column, right-aligned numbers, like a pandas repr.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| {
            let mut out = String::new();
            for (i, (cell, &w)) in cells.iter().zip(&widths).enumerate() {
                if i == 0 {
                    out.push_str(&format!("{cell:<w$}"));
                } else {
                    out.push_str(&format!("  {cell:>w$}"));
                }
            }
            out.trim_end().to_string()
        };

        writeln!(f, "{}", line(self.columns.as_slice()))?;
        for row in &self.rows {
            writeln!(f, "{}", line(row.as_slice()))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Headless output
// ---------------------------------------------------------------------------

/// Markdown-ish headings followed by aligned tables.
pub fn render_text(results: &[AnalysisResult]) -> String {
    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("### {}\n", result.heading));
        out.push_str(&Tabular::from_payload(&result.payload).to_string());
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    filter: &'a TypeStrainFilter,
    results: &'a [AnalysisResult],
}

/// The same results as pretty-printed JSON, with the filter that produced them.
pub fn render_json(
    filter: &TypeStrainFilter,
    results: &[AnalysisResult],
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport { filter, results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::{SummaryRow, SummaryTable};

    fn summary() -> AnalysisResult {
        let row = |category: &str, n: usize, v: f64| SummaryRow {
            category: category.to_string(),
            species_count: n,
            prod_metabolites: v,
            util_metabolites: 0.0,
            anti_metabolites: 0.0,
        };
        AnalysisResult {
            action: None,
            heading: "Broad Statistics for Type and Non-Type Strains".to_string(),
            payload: Payload::Summary(SummaryTable {
                rows: vec![
                    row("Type Strain", 1, 2.0),
                    row("Non-Type Strain", 1, 3.0),
                    row("Total", 2, 5.0),
                ],
            }),
        }
    }

    #[test]
    fn summary_tabulates_in_fixed_column_order() {
        let t = Tabular::from_payload(&summary().payload);
        assert_eq!(t.columns[0], "Category");
        assert_eq!(t.columns[4], "Anti Metabolites");
        assert_eq!(t.rows[2], vec!["Total", "2", "5", "0", "0"]);
    }

    #[test]
    fn text_report_aligns_columns() {
        let text = render_text(&[summary()]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "### Broad Statistics for Type and Non-Type Strains");
        assert!(lines[1].starts_with("Category         Species Count"));
        assert!(lines[4].starts_with("Total          "));
        assert!(lines[4].ends_with('0'));
    }

    #[test]
    fn counts_use_ranked_column_as_header() {
        let t = Tabular::from_payload(&Payload::Counts {
            column: "species".to_string(),
            entries: vec![("A".to_string(), 5)],
        });
        assert_eq!(t.columns, vec!["species", "Count"]);
        assert_eq!(t.rows, vec![vec!["A".to_string(), "5".to_string()]]);
    }

    #[test]
    fn json_report_carries_filter_and_payload_type() {
        let json = render_json(&TypeStrainFilter::default(), &[summary()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["filter"]["show_type_strain"], true);
        assert_eq!(value["results"][0]["payload"]["type"], "summary");
        let rows = &value["results"][0]["payload"]["rows"];
        assert!(rows.is_array());
        assert_eq!(rows[2]["category"], "Total");
        assert_eq!(rows[2]["species_count"], 2);
    }
}
