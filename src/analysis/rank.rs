use indexmap::IndexMap;

use super::aggregate::sum_metabolites;
use super::SchemaError;
use crate::data::model::RecordTable;

/// The `n` most frequent values of `column`, most frequent first.
///
/// Blank cells are missing values and are not counted. Ties keep the order
/// in which values were first encountered, so the frequency table is built in
/// row order and sorted stably.
pub fn top_categorical_counts(
    table: &RecordTable,
    column: &str,
    n: usize,
) -> Result<Vec<(String, usize)>, SchemaError> {
    let values = table
        .column_text(column)
        .ok_or_else(|| SchemaError::UnknownColumn(column.to_string()))?;

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for value in values.into_iter().filter(|v| !v.is_empty()) {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    Ok(ranked)
}

/// The `n` metabolite columns with the largest sums, largest first. Ties keep
/// column order.
pub fn top_metabolites(table: &RecordTable, n: usize) -> Vec<(String, f64)> {
    let mut ranked: Vec<(String, f64)> = sum_metabolites(table).into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    fn species_table(species: &[&str]) -> RecordTable {
        let rows: Vec<(i64, &str, i64, Vec<f64>)> = species
            .iter()
            .enumerate()
            .map(|(i, s)| (i as i64, *s, 0, vec![0.0]))
            .collect();
        table(&["m"], &rows)
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        // C first seen before B, but B and A both outnumber C.
        let t = species_table(&[
            "B", "C", "A", "B", "A", "C", "B", "A", "B", "A", "B", "A", "C",
        ]);
        let ranked = top_categorical_counts(&t, "species", 10).unwrap();
        assert_eq!(
            ranked,
            vec![
                ("B".to_string(), 5),
                ("A".to_string(), 5),
                ("C".to_string(), 3)
            ]
        );
    }

    #[test]
    fn at_most_n_entries_in_non_increasing_order() {
        let names: Vec<String> = (0..15).map(|i| format!("sp{}", i % 12)).collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        let ranked = top_categorical_counts(&species_table(&refs), "species", 10).unwrap();
        assert_eq!(ranked.len(), 10);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn fewer_distinct_values_than_n() {
        let ranked = top_categorical_counts(&species_table(&["A", "A"]), "species", 10).unwrap();
        assert_eq!(ranked, vec![("A".to_string(), 2)]);
        let empty = top_categorical_counts(&species_table(&[]), "species", 10).unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn blank_values_are_not_ranked() {
        let t = species_table(&["", "", "A"]);
        let ranked = top_categorical_counts(&t, "species", 10).unwrap();
        assert_eq!(ranked, vec![("A".to_string(), 1)]);

        let all_blank = species_table(&["", ""]);
        assert!(top_categorical_counts(&all_blank, "species", 10)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unknown_column() {
        let err = top_categorical_counts(&species_table(&["A"]), "genus", 10).unwrap_err();
        assert_eq!(err, SchemaError::UnknownColumn("genus".to_string()));
    }

    #[test]
    fn metabolites_ranked_by_sum_with_column_order_ties() {
        let t = table(
            &["m1", "m2", "m3", "m4"],
            &[
                (1, "A", 1, vec![1.0, 3.0, 0.0, 3.0]),
                (2, "B", 0, vec![1.0, 0.0, 5.0, 0.0]),
            ],
        );
        let ranked = top_metabolites(&t, 3);
        assert_eq!(
            ranked,
            vec![
                ("m3".to_string(), 5.0),
                ("m2".to_string(), 3.0),
                ("m4".to_string(), 3.0)
            ]
        );
    }
}
