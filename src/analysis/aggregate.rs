use indexmap::IndexMap;

use crate::data::model::RecordTable;

/// Metabolite column → sum, in column order.
pub type MetaboliteSums = IndexMap<String, f64>;

/// Sum every metabolite column over all rows of `table`. An empty table
/// still yields every column, each with 0.
pub fn sum_metabolites(table: &RecordTable) -> MetaboliteSums {
    let mut totals = vec![0.0; table.metabolite_columns.len()];
    for record in &table.records {
        for (total, value) in totals.iter_mut().zip(&record.metabolites) {
            *total += value;
        }
    }
    table
        .metabolite_columns
        .iter()
        .cloned()
        .zip(totals)
        .collect()
}

/// Grand total over every metabolite column.
pub fn total_metabolites(table: &RecordTable) -> f64 {
    table.records.iter().map(|r| r.metabolite_total()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    #[test]
    fn sums_follow_column_order() {
        let t = table(
            &["lactate", "acetate", "butyrate"],
            &[
                (1, "A", 1, vec![1.0, 0.0, 2.0]),
                (2, "B", 0, vec![1.0, 4.0, 0.0]),
            ],
        );
        let sums = sum_metabolites(&t);
        let pairs: Vec<(&str, f64)> = sums.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(pairs, vec![("lactate", 2.0), ("acetate", 4.0), ("butyrate", 2.0)]);
        assert_eq!(total_metabolites(&t), 8.0);
    }

    #[test]
    fn empty_table_maps_every_column_to_zero() {
        let t = table(&["lactate", "acetate"], &[]);
        let sums = sum_metabolites(&t);
        assert_eq!(sums.len(), 2);
        assert!(sums.values().all(|v| *v == 0.0));
        assert_eq!(total_metabolites(&t), 0.0);
    }

    #[test]
    fn row_order_does_not_matter() {
        let rows: Vec<(i64, &str, i64, Vec<f64>)> = vec![
            (1, "A", 1, vec![1.0, 2.0]),
            (2, "B", 0, vec![3.0, 0.0]),
            (3, "C", 0, vec![0.0, 5.0]),
        ];
        let mut reversed = rows.clone();
        reversed.reverse();
        assert_eq!(
            sum_metabolites(&table(&["m1", "m2"], &rows)),
            sum_metabolites(&table(&["m1", "m2"], &reversed))
        );
    }
}
