//! Row sorting by a single column.
//!
//! The sort is stable. Descending order reverses the comparator rather than
//! the sorted sequence, so rows with equal keys keep their original relative
//! order in both directions.
//!
//! Numeric sorting treats anything that does not parse as a float (after
//! turning a decimal comma into a dot) as negative infinity: bad values come
//! first when ascending and last when descending. Callers rely on this.
//!
//! Case-insensitive string sorting compares Unicode case folds, so `Straße`
//! and `STRASSE` are equal keys.

use crate::config::{SortDirection, SortKey, SortType};
use caseless::default_case_fold_str;
use std::cmp::Ordering;
use tracing::debug;

/// Sort `rows` by `key`. `width` is the header count used to clamp the column.
pub fn sort_rows(rows: Vec<Vec<String>>, key: &SortKey, width: usize) -> Vec<Vec<String>> {
    let idx = key.field.saturating_sub(1).min(width.saturating_sub(1));
    debug!(
        "Sorting {} rows by column {} ({:?}, {:?})",
        rows.len(),
        idx + 1,
        key.kind,
        key.direction
    );

    let cell = |row: &[String]| row.get(idx).cloned().unwrap_or_default();

    match key.kind {
        SortType::Numeric => {
            let keyed: Vec<(f64, Vec<String>)> = rows
                .into_iter()
                .map(|r| (to_number(&cell(r.as_slice())), r))
                .collect();
            sort_keyed(keyed, key.direction, |a: &f64, b: &f64| {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            })
        }
        SortType::String => {
            let keyed: Vec<(String, Vec<String>)> = rows
                .into_iter()
                .map(|r| {
                    let v = cell(r.as_slice());
                    let v = if key.ignore_case {
                        default_case_fold_str(&v)
                    } else {
                        v
                    };
                    (v, r)
                })
                .collect();
            sort_keyed(keyed, key.direction, |a: &String, b: &String| a.cmp(b))
        }
    }
}

fn sort_keyed<K>(
    mut keyed: Vec<(K, Vec<String>)>,
    direction: SortDirection,
    cmp: impl Fn(&K, &K) -> Ordering,
) -> Vec<Vec<String>> {
    match direction {
        SortDirection::Asc => keyed.sort_by(|a, b| cmp(&a.0, &b.0)),
        SortDirection::Desc => keyed.sort_by(|a, b| cmp(&b.0, &a.0)),
    }
    keyed.into_iter().map(|(_, row)| row).collect()
}

/// `"1 234,5"` does not parse; `" 12,5 "` parses as `12.5`. NaN counts as unparsable.
fn to_number(value: &str) -> f64 {
    match value.trim().replace(',', ".").parse::<f64>() {
        Ok(n) if !n.is_nan() => n,
        _ => f64::NEG_INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: &[&str]) -> Vec<Vec<String>> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| vec![i.to_string(), v.to_string()])
            .collect()
    }

    fn column(rows: &[Vec<String>], idx: usize) -> Vec<&str> {
        rows.iter().map(|r| r[idx].as_str()).collect()
    }

    #[test]
    fn numeric_unparsable_sorts_first() {
        let sorted = sort_rows(rows(&["10", "2", "bad"]), &SortKey::new(2).numeric(), 2);
        assert_eq!(column(&sorted, 1), vec!["bad", "2", "10"]);
    }

    #[test]
    fn numeric_descending_puts_unparsable_last() {
        let key = SortKey::new(2).numeric().descending();
        let sorted = sort_rows(rows(&["1,5", "bad", "10", "NaN"]), &key, 2);
        assert_eq!(column(&sorted, 1), vec!["10", "1,5", "bad", "NaN"]);
    }

    #[test]
    fn string_sort_ignores_case_by_default() {
        let sorted = sort_rows(rows(&["beta", "Alpha", "alpha"]), &SortKey::new(2), 2);
        assert_eq!(column(&sorted, 1), vec!["Alpha", "alpha", "beta"]);
    }

    #[test]
    fn ignore_case_uses_full_case_folding() {
        let sorted = sort_rows(rows(&["Strasz", "Straße", "STRASSE"]), &SortKey::new(2), 2);
        assert_eq!(column(&sorted, 1), vec!["Straße", "STRASSE", "Strasz"]);
    }

    #[test]
    fn case_sensitive_string_sort() {
        let key = SortKey::new(2).case_sensitive();
        let sorted = sort_rows(rows(&["beta", "alpha", "Beta"]), &key, 2);
        assert_eq!(column(&sorted, 1), vec!["Beta", "alpha", "beta"]);
    }

    #[test]
    fn descending_keeps_ties_in_original_order() {
        let key = SortKey::new(2).descending();
        let sorted = sort_rows(rows(&["x", "y", "x"]), &key, 2);
        assert_eq!(column(&sorted, 0), vec!["1", "0", "2"]);
    }

    #[test]
    fn field_index_is_clamped() {
        let sorted = sort_rows(rows(&["b", "a"]), &SortKey::new(99).descending(), 2);
        assert_eq!(column(&sorted, 1), vec!["b", "a"]);
        let sorted = sort_rows(rows(&["b", "a"]), &SortKey::new(0).descending(), 2);
        assert_eq!(column(&sorted, 0), vec!["1", "0"]);
    }

    #[test]
    fn missing_cells_sort_as_empty() {
        let input = vec![vec!["x".to_string(), "b".to_string()], vec!["y".to_string()]];
        let sorted = sort_rows(input, &SortKey::new(2), 2);
        assert_eq!(sorted[0], vec!["y"]);
    }
}
