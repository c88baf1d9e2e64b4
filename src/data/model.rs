use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// RawCell – a single cell before cleaning
// ---------------------------------------------------------------------------

/// A source cell as read from disk, before the fixed-column coercion rules
/// are applied. CSV yields `Text`/`Null`, Parquet may also yield `Number`.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCell {
    Text(String),
    Number(f64),
    Null,
}

impl RawCell {
    /// Classify a textual cell: blank means missing.
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            RawCell::Null
        } else {
            RawCell::Text(s.to_string())
        }
    }

    /// Numeric reading of the cell. `None` for missing, non-numeric and NaN
    /// cells, which the loader then zero-fills.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            RawCell::Number(v) => *v,
            RawCell::Text(s) => s.trim().parse::<f64>().ok()?,
            RawCell::Null => return None,
        };
        if v.is_nan() {
            None
        } else {
            Some(v)
        }
    }

    /// Text reading of the cell; missing cells become the empty string.
    pub fn into_text(self) -> String {
        match self {
            RawCell::Text(s) => s,
            RawCell::Number(v) => v.to_string(),
            RawCell::Null => String::new(),
        }
    }
}

/// Header plus rows exactly as read, shared by every input format.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<RawCell>>,
}

// ---------------------------------------------------------------------------
// StrainRecord – one row of a dataset
// ---------------------------------------------------------------------------

/// One strain record. `metabolites` is parallel to
/// [`RecordTable::metabolite_columns`].
#[derive(Debug, Clone, PartialEq)]
pub struct StrainRecord {
    pub id: i64,
    pub species: String,
    pub is_type_strain: i64,
    pub designation: String,
    pub metabolites: Vec<f64>,
}

impl StrainRecord {
    /// Sum across every metabolite column of this row.
    pub fn metabolite_total(&self) -> f64 {
        self.metabolites.iter().sum()
    }
}

// ---------------------------------------------------------------------------
// RecordTable – a loaded (or derived) dataset
// ---------------------------------------------------------------------------

/// A cleaned dataset. The schema is the four fixed columns followed by the
/// metabolite columns, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordTable {
    /// Names of the four fixed columns as they appear in the source header.
    pub fixed_columns: [String; 4],
    /// Ordered metabolite column names (schema positions 4..).
    pub metabolite_columns: Vec<String>,
    pub records: Vec<StrainRecord>,
}

impl RecordTable {
    pub fn new(
        fixed_columns: [String; 4],
        metabolite_columns: Vec<String>,
        records: Vec<StrainRecord>,
    ) -> Self {
        Self {
            fixed_columns,
            metabolite_columns,
            records,
        }
    }

    /// Same schema, different rows. Used by every derived view so the
    /// metabolite column set survives filtering down to zero rows.
    pub fn with_records(&self, records: Vec<StrainRecord>) -> Self {
        Self {
            fixed_columns: self.fixed_columns.clone(),
            metabolite_columns: self.metabolite_columns.clone(),
            records,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Full column list in schema order.
    pub fn schema(&self) -> Vec<String> {
        self.fixed_columns
            .iter()
            .chain(self.metabolite_columns.iter())
            .cloned()
            .collect()
    }

    /// The cells of one column rendered as text, in row order.
    /// `None` when the table has no such column.
    pub fn column_text(&self, column: &str) -> Option<Vec<String>> {
        if let Some(pos) = self.fixed_columns.iter().position(|c| c == column) {
            let values = self
                .records
                .iter()
                .map(|r| match pos {
                    0 => r.id.to_string(),
                    1 => r.species.clone(),
                    2 => r.is_type_strain.to_string(),
                    _ => r.designation.clone(),
                })
                .collect();
            return Some(values);
        }
        let idx = self.metabolite_columns.iter().position(|c| c == column)?;
        Some(
            self.records
                .iter()
                .map(|r| r.metabolites[idx].to_string())
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// Dataset – which of the three sources a table came from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Dataset {
    Production,
    Utilization,
    Antimicrobial,
}

impl Dataset {
    pub const ALL: [Dataset; 3] = [
        Dataset::Production,
        Dataset::Utilization,
        Dataset::Antimicrobial,
    ];

    /// Short prefix used on the command line and in file names.
    pub fn short_name(self) -> &'static str {
        match self {
            Dataset::Production => "prod",
            Dataset::Utilization => "util",
            Dataset::Antimicrobial => "anti",
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dataset::Production => "Production",
            Dataset::Utilization => "Utilization",
            Dataset::Antimicrobial => "Antimicrobial",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Test helper: a table with the default fixed headers.
    pub(crate) fn table(metabolites: &[&str], rows: &[(i64, &str, i64, Vec<f64>)]) -> RecordTable {
        let records = rows
            .iter()
            .map(|(id, species, ts, values)| StrainRecord {
                id: *id,
                species: species.to_string(),
                is_type_strain: *ts,
                designation: format!("DSM {id}"),
                metabolites: values.clone(),
            })
            .collect();
        RecordTable::new(
            [
                "id".to_string(),
                "species".to_string(),
                "is_type_strain".to_string(),
                "designation".to_string(),
            ],
            metabolites.iter().map(|m| m.to_string()).collect(),
            records,
        )
    }

    #[test]
    fn raw_cell_numeric_reading() {
        assert_eq!(RawCell::from_text("  "), RawCell::Null);
        assert_eq!(RawCell::from_text("3.5").as_f64(), Some(3.5));
        assert_eq!(RawCell::from_text("NaN").as_f64(), None);
        assert_eq!(RawCell::from_text("abc").as_f64(), None);
        assert_eq!(RawCell::Number(2.0).as_f64(), Some(2.0));
    }

    #[test]
    fn column_text_covers_fixed_and_metabolite_columns() {
        let t = table(&["acetate"], &[(7, "E. coli", 1, vec![2.0])]);
        assert_eq!(t.column_text("species"), Some(vec!["E. coli".to_string()]));
        assert_eq!(t.column_text("id"), Some(vec!["7".to_string()]));
        assert_eq!(t.column_text("acetate"), Some(vec!["2".to_string()]));
        assert_eq!(t.column_text("strain_number"), None);
        assert_eq!(t.schema().len(), 5);
    }
}
