use serde::Serialize;

use super::model::RecordTable;

// ---------------------------------------------------------------------------
// Type-strain predicate
// ---------------------------------------------------------------------------

/// Indicator value of type strains.
pub const TYPE_STRAIN: i64 = 1;
/// Indicator value of every other strain.
pub const NON_TYPE_STRAIN: i64 = 0;

/// Rows whose `is_type_strain` equals `value`, original order, all columns.
pub fn filter_by_type_strain(table: &RecordTable, value: i64) -> RecordTable {
    let records = table
        .records
        .iter()
        .filter(|r| r.is_type_strain == value)
        .cloned()
        .collect();
    table.with_records(records)
}

/// Per-row membership of `table` in partition `value`. Used when one table's
/// partition is applied to another, positionally aligned table.
pub fn partition_mask(table: &RecordTable, value: i64) -> Vec<bool> {
    table
        .records
        .iter()
        .map(|r| r.is_type_strain == value)
        .collect()
}

/// Rows of `table` whose position is set in `mask`. The mask must have one
/// entry per row; callers check alignment first.
pub fn apply_mask(table: &RecordTable, mask: &[bool]) -> RecordTable {
    let records = table
        .records
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(r, _)| r.clone())
        .collect();
    table.with_records(records)
}

// ---------------------------------------------------------------------------
// Checkbox state
// ---------------------------------------------------------------------------

/// The two "Show Type Strain (1)" / "Show Non-Type Strain (0)" checkboxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeStrainFilter {
    pub show_type_strain: bool,
    pub show_non_type_strain: bool,
}

impl Default for TypeStrainFilter {
    fn default() -> Self {
        Self {
            show_type_strain: true,
            show_non_type_strain: true,
        }
    }
}

impl TypeStrainFilter {
    /// The single partition to keep, or `None` for "no filtering". Both
    /// boxes ticked and both cleared mean the same thing: show everything.
    pub fn partition(&self) -> Option<i64> {
        match (self.show_type_strain, self.show_non_type_strain) {
            (true, false) => Some(TYPE_STRAIN),
            (false, true) => Some(NON_TYPE_STRAIN),
            _ => None,
        }
    }

    /// Filtered view of one table, on that table's own indicator column.
    pub fn apply(&self, table: &RecordTable) -> RecordTable {
        match self.partition() {
            Some(value) => filter_by_type_strain(table, value),
            None => table.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::table;

    fn sample() -> RecordTable {
        table(
            &["acetate", "lactate"],
            &[
                (1, "A", 1, vec![2.0, 0.0]),
                (2, "B", 0, vec![0.0, 3.0]),
                (3, "A", 0, vec![1.0, 1.0]),
                (4, "C", 1, vec![0.0, 5.0]),
            ],
        )
    }

    #[test]
    fn partitions_reconstruct_the_table() {
        let t = sample();
        let ones = filter_by_type_strain(&t, TYPE_STRAIN);
        let zeros = filter_by_type_strain(&t, NON_TYPE_STRAIN);
        assert_eq!(ones.len() + zeros.len(), t.len());

        let mut ids: Vec<i64> = ones
            .records
            .iter()
            .chain(zeros.records.iter())
            .map(|r| r.id)
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(ones.records.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(ones.metabolite_columns, t.metabolite_columns);
    }

    #[test]
    fn filtering_leaves_source_untouched() {
        let t = sample();
        let before = t.clone();
        let _ = filter_by_type_strain(&t, TYPE_STRAIN);
        assert_eq!(t, before);
    }

    #[test]
    fn checkbox_combinations() {
        let both = TypeStrainFilter::default();
        let none = TypeStrainFilter {
            show_type_strain: false,
            show_non_type_strain: false,
        };
        let only_type = TypeStrainFilter {
            show_type_strain: true,
            show_non_type_strain: false,
        };
        let only_non_type = TypeStrainFilter {
            show_type_strain: false,
            show_non_type_strain: true,
        };

        assert_eq!(both.partition(), None);
        assert_eq!(none.partition(), None);
        assert_eq!(only_type.partition(), Some(1));
        assert_eq!(only_non_type.partition(), Some(0));

        assert_eq!(none.apply(&sample()).len(), 4);
        assert_eq!(only_non_type.apply(&sample()).len(), 2);
    }

    #[test]
    fn mask_selects_positions() {
        let t = sample();
        let mask = partition_mask(&t, TYPE_STRAIN);
        assert_eq!(mask, vec![true, false, false, true]);
        let masked = apply_mask(&t, &mask);
        assert_eq!(masked, filter_by_type_strain(&t, TYPE_STRAIN));
    }
}
