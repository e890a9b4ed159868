//! Curated field allowlist for the minimal outline.
//!
//! Most uploads are keyword-research exports (Ahrefs, Semrush, Marketing
//! Miner and friends). For those, a handful of columns carry nearly all the
//! value, and the rest is noise for a long-form reading assistant. The list
//! below names those columns and their common spellings; matching is a
//! case-insensitive comparison of trimmed header labels.
//!
//! This is a heuristic, not a schema. When it selects nothing useful the
//! outline renderer falls back to the first [`FALLBACK_FIELD_COUNT`] columns.
//! Callers with other domains can pass their own list to
//! [`select_fields`].

/// Column names kept by [`crate::config::Detail::Minimal`], in output order.
pub const NOTEBOOK_MIN_FIELDS: &[&str] = &[
    "Keyword",
    "Country",
    "Languages",
    "Volume",
    "Global volume",
    "KD",
    "Difficulty",
    "Keyword difficulty",
    "CPC",
    "CPS",
    "Traffic potential",
    "Global traffic potential",
    "SERP features",
    "SERP Features",
    "Current organic traffic",
    "Previous organic traffic",
    "Organic traffic change",
    "Current position",
    "Previous position",
    "Current URL",
    "Previous URL",
    "Parent Keyword",
    "Parent keyword",
    "Last Update",
    "Last update",
    "First seen",
    "Intents",
    "Intent",
];

/// Width of the fallback selection when the allowlist finds nothing useful.
pub const FALLBACK_FIELD_COUNT: usize = 8;

/// Index of the first header equal to `name`, ignoring case and surrounding whitespace.
pub fn find_header(headers: &[String], name: &str) -> Option<usize> {
    let name = name.trim().to_lowercase();
    headers
        .iter()
        .position(|h| h.trim().to_lowercase() == name)
}

/// Column indices selected by `allowlist`, in allowlist order, each at most once.
///
/// Falls back to the first [`FALLBACK_FIELD_COUNT`] columns when nothing
/// matches, or when the only match is `heading_idx` (which is rendered as
/// the record heading and would leave the body empty).
pub fn select_fields(headers: &[String], allowlist: &[&str], heading_idx: usize) -> Vec<usize> {
    let mut selected: Vec<usize> = Vec::new();
    for name in allowlist {
        if let Some(idx) = find_header(headers, name) {
            if !selected.contains(&idx) {
                selected.push(idx);
            }
        }
    }

    if selected.iter().all(|&idx| idx == heading_idx) {
        return (0..headers.len().min(FALLBACK_FIELD_COUNT)).collect();
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_case_insensitively_in_allowlist_order() {
        let h = headers(&["cpc", " Volume ", "Keyword", "Noise"]);
        assert_eq!(select_fields(&h, NOTEBOOK_MIN_FIELDS, 2), vec![2, 1, 0]);
    }

    #[test]
    fn synonyms_select_a_column_once() {
        let h = headers(&["Keyword", "SERP features"]);
        assert_eq!(select_fields(&h, NOTEBOOK_MIN_FIELDS, 0), vec![0, 1]);
    }

    #[test]
    fn only_heading_match_falls_back_to_first_columns() {
        let names: Vec<String> = (1..=10).map(|i| format!("c{i}")).collect();
        let mut h = vec!["Keyword".to_string()];
        h.extend(names);
        assert_eq!(select_fields(&h, NOTEBOOK_MIN_FIELDS, 0), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn no_match_falls_back_to_all_narrow_columns() {
        let h = headers(&["a", "b", "c"]);
        assert_eq!(select_fields(&h, NOTEBOOK_MIN_FIELDS, 0), vec![0, 1, 2]);
    }

    #[test]
    fn find_header_trims_and_ignores_case() {
        let h = headers(&["Name", " KEYWORD "]);
        assert_eq!(find_header(&h, "keyword"), Some(1));
        assert_eq!(find_header(&h, "volume"), None);
    }
}
