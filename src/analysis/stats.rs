use std::collections::HashSet;

use serde::Serialize;

use super::aggregate::total_metabolites;
use super::SchemaError;
use crate::data::filter::{
    apply_mask, filter_by_type_strain, partition_mask, NON_TYPE_STRAIN, TYPE_STRAIN,
};
use crate::data::model::{Dataset, RecordTable};

/// Column headings of the summary table, in display order.
pub const SUMMARY_COLUMNS: [&str; 5] = [
    "Category",
    "Species Count",
    "Prod Metabolites",
    "Util Metabolites",
    "Anti Metabolites",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub category: String,
    pub species_count: usize,
    pub prod_metabolites: f64,
    pub util_metabolites: f64,
    pub anti_metabolites: f64,
}

impl SummaryRow {
    /// Cells in [`SUMMARY_COLUMNS`] order.
    pub fn cells(&self) -> [String; 5] {
        [
            self.category.clone(),
            self.species_count.to_string(),
            self.prod_metabolites.to_string(),
            self.util_metabolites.to_string(),
            self.anti_metabolites.to_string(),
        ]
    }
}

/// "Type Strain", "Non-Type Strain" and "Total" rows, in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SummaryTable {
    pub rows: Vec<SummaryRow>,
}

impl SummaryTable {
    #[cfg(test)]
    pub fn row(&self, category: &str) -> Option<&SummaryRow> {
        self.rows.iter().find(|r| r.category == category)
    }
}

/// Build the broad statistics table from the three unfiltered datasets.
///
/// The partition of every dataset is taken from `prod`'s indicator column,
/// row by row, so `util` and `anti` must have as many rows as `prod`.
/// The Total row is the element-wise sum of the two partition rows, which
/// counts a species twice when it has both type and non-type strains.
pub fn compute_statistics(
    prod: &RecordTable,
    util: &RecordTable,
    anti: &RecordTable,
) -> Result<SummaryTable, SchemaError> {
    for (dataset, table) in [(Dataset::Utilization, util), (Dataset::Antimicrobial, anti)] {
        if table.len() != prod.len() {
            return Err(SchemaError::RowCountMismatch {
                dataset,
                expected: prod.len(),
                found: table.len(),
            });
        }
        warn_on_id_divergence(dataset, prod, table);
    }

    let type_strain = partition_row("Type Strain", TYPE_STRAIN, prod, util, anti);
    let non_type_strain = partition_row("Non-Type Strain", NON_TYPE_STRAIN, prod, util, anti);
    let total = SummaryRow {
        category: "Total".to_string(),
        species_count: type_strain.species_count + non_type_strain.species_count,
        prod_metabolites: type_strain.prod_metabolites + non_type_strain.prod_metabolites,
        util_metabolites: type_strain.util_metabolites + non_type_strain.util_metabolites,
        anti_metabolites: type_strain.anti_metabolites + non_type_strain.anti_metabolites,
    };

    Ok(SummaryTable {
        rows: vec![type_strain, non_type_strain, total],
    })
}

fn partition_row(
    category: &str,
    value: i64,
    prod: &RecordTable,
    util: &RecordTable,
    anti: &RecordTable,
) -> SummaryRow {
    let prod_part = filter_by_type_strain(prod, value);
    let mask = partition_mask(prod, value);

    SummaryRow {
        category: category.to_string(),
        species_count: distinct_species(&prod_part),
        prod_metabolites: total_metabolites(&prod_part),
        util_metabolites: total_metabolites(&apply_mask(util, &mask)),
        anti_metabolites: total_metabolites(&apply_mask(anti, &mask)),
    }
}

fn distinct_species(table: &RecordTable) -> usize {
    table
        .records
        .iter()
        .map(|r| r.species.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Alignment is positional; a differing id at the same position usually means
/// the files were sorted differently.
fn warn_on_id_divergence(dataset: Dataset, prod: &RecordTable, other: &RecordTable) {
    let diverging = prod
        .records
        .iter()
        .zip(&other.records)
        .filter(|(p, o)| p.id != o.id)
        .count();
    if diverging > 0 {
        log::warn!(
            "{dataset} rows are aligned to Production by position, but {diverging} of {} ids differ",
            prod.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    #[test]
    fn two_row_example() {
        let prod = table(
            &["metA", "metB"],
            &[(1, "A", 1, vec![2.0, 0.0]), (2, "B", 0, vec![0.0, 3.0])],
        );
        let util = table(&["u"], &[(1, "A", 1, vec![1.0]), (2, "B", 0, vec![4.0])]);
        let anti = table(&["a"], &[(1, "A", 1, vec![0.0]), (2, "B", 0, vec![1.0])]);

        let stats = compute_statistics(&prod, &util, &anti).unwrap();
        let categories: Vec<&str> = stats.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(categories, vec!["Type Strain", "Non-Type Strain", "Total"]);

        let ts = stats.row("Type Strain").unwrap();
        assert_eq!((ts.species_count, ts.prod_metabolites), (1, 2.0));
        let nts = stats.row("Non-Type Strain").unwrap();
        assert_eq!((nts.species_count, nts.prod_metabolites), (1, 3.0));
        let total = stats.row("Total").unwrap();
        assert_eq!(total.species_count, 2);
        assert_eq!(total.prod_metabolites, 5.0);
        assert_eq!(total.util_metabolites, 5.0);
        assert_eq!(total.anti_metabolites, 1.0);
    }

    #[test]
    fn total_species_is_a_sum_not_a_union() {
        let prod = table(
            &["m"],
            &[
                (1, "Bacillus", 1, vec![1.0]),
                (2, "Bacillus", 0, vec![1.0]),
                (3, "Bacillus", 0, vec![1.0]),
            ],
        );
        let stats = compute_statistics(&prod, &prod, &prod).unwrap();
        assert_eq!(stats.row("Type Strain").unwrap().species_count, 1);
        assert_eq!(stats.row("Non-Type Strain").unwrap().species_count, 1);
        assert_eq!(stats.row("Total").unwrap().species_count, 2);
    }

    #[test]
    fn other_datasets_are_masked_by_production_partition() {
        let prod = table(&["m"], &[(1, "A", 1, vec![0.0]), (2, "B", 0, vec![0.0])]);
        // util's own indicator column disagrees with prod's.
        let util = table(&["u"], &[(1, "A", 0, vec![10.0]), (2, "B", 1, vec![1.0])]);
        let stats = compute_statistics(&prod, &util, &prod).unwrap();
        assert_eq!(stats.row("Type Strain").unwrap().util_metabolites, 10.0);
        assert_eq!(stats.row("Non-Type Strain").unwrap().util_metabolites, 1.0);
    }

    #[test]
    fn row_count_mismatch_is_an_error() {
        let prod = table(&["m"], &[(1, "A", 1, vec![1.0]), (2, "B", 0, vec![1.0])]);
        let short = table(&["m"], &[(1, "A", 1, vec![1.0])]);
        let err = compute_statistics(&prod, &prod, &short).unwrap_err();
        assert_eq!(
            err,
            SchemaError::RowCountMismatch {
                dataset: Dataset::Antimicrobial,
                expected: 2,
                found: 1,
            }
        );
    }

    #[test]
    fn empty_datasets_give_zero_rows() {
        let empty = table(&["m"], &[]);
        let stats = compute_statistics(&empty, &empty, &empty).unwrap();
        assert!(stats
            .rows
            .iter()
            .all(|r| r.species_count == 0 && r.prod_metabolites == 0.0));
    }
}
