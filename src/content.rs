//! Parsing of list-shaped page content.
//!
//! Checklist and index pages store their lists inside the single `content`
//! string:
//!
//! - **Checklist**: `"Ver auroras | Adoptar una mascota"`, or one item per
//!   line when no `|` is present.
//! - **Index**: `"Orígenes:2 | Lugares Favoritos:5"`, each entry a section
//!   name and the `order` of the page it points to.
//!
//! Blank segments (e.g. a trailing `|`) are skipped. An index entry whose
//! page number is missing or unparsable is an error rather than page 0.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContentError {
    #[error("index entry {0:?} has no page number (expected \"Name:page\")")]
    MissingPageNumber(String),
    #[error("index entry {entry:?} has an invalid page number {value:?}")]
    InvalidPageNumber { entry: String, value: String },
    #[error("index entry {0:?} has an empty name")]
    EmptyName(String),
}

/// One checklist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: usize,
    pub text: String,
    pub checked: bool,
}

/// Split checklist content into unchecked items.
pub fn parse_checklist(content: &str) -> Vec<ChecklistItem> {
    let separator = if content.contains('|') { '|' } else { '\n' };
    content
        .split(separator)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .enumerate()
        .map(|(id, text)| ChecklistItem {
            id,
            text: text.to_string(),
            checked: false,
        })
        .collect()
}

/// Flip the `checked` state of the item with `id`. Returns false if absent.
pub fn toggle_item(items: &mut [ChecklistItem], id: usize) -> bool {
    match items.iter_mut().find(|item| item.id == id) {
        Some(item) => {
            item.checked = !item.checked;
            true
        }
        None => false,
    }
}

/// One table-of-contents entry.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub name: String,
    /// `order` of the target page.
    pub page: f64,
}

/// Parse index content into entries.
///
/// The page number follows the *last* colon, so section names may contain
/// colons themselves.
pub fn parse_index(content: &str) -> Result<Vec<IndexEntry>, ContentError> {
    content
        .split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(parse_index_entry)
        .collect()
}

fn parse_index_entry(segment: &str) -> Result<IndexEntry, ContentError> {
    let (name, page) = segment
        .rsplit_once(':')
        .ok_or_else(|| ContentError::MissingPageNumber(segment.to_string()))?;
    let name = name.trim();
    let page = page.trim();
    if name.is_empty() {
        return Err(ContentError::EmptyName(segment.to_string()));
    }
    if page.is_empty() {
        return Err(ContentError::MissingPageNumber(segment.to_string()));
    }
    let number = page
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| ContentError::InvalidPageNumber {
            entry: segment.to_string(),
            value: page.to_string(),
        })?;
    Ok(IndexEntry {
        name: name.to_string(),
        page: number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Checklist
    // =========================================================================

    #[test]
    fn checklist_splits_on_pipes() {
        let items = parse_checklist("Ver auroras | Adoptar una mascota |Viajar");
        let texts: Vec<&str> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Ver auroras", "Adoptar una mascota", "Viajar"]);
        assert!(items.iter().all(|i| !i.checked));
        assert_eq!(items[2].id, 2);
    }

    #[test]
    fn checklist_falls_back_to_newlines() {
        let items = parse_checklist("one\ntwo\n\nthree\n");
        assert_eq!(items.len(), 3);
        assert_eq!(items[1].text, "two");
    }

    #[test]
    fn pipes_win_over_newlines() {
        let items = parse_checklist("a\nb | c");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "a\nb");
    }

    #[test]
    fn empty_checklist() {
        assert!(parse_checklist("").is_empty());
        assert!(parse_checklist("  |  ").is_empty());
    }

    #[test]
    fn toggle_flips_one_item() {
        let mut items = parse_checklist("a | b");
        assert!(toggle_item(&mut items, 1));
        assert!(!items[0].checked);
        assert!(items[1].checked);
        assert!(toggle_item(&mut items, 1));
        assert!(!items[1].checked);
        assert!(!toggle_item(&mut items, 9));
    }

    // =========================================================================
    // Index
    // =========================================================================

    #[test]
    fn index_parses_entries() {
        let entries = parse_index("Orígenes:2 | Lugares Favoritos:5 | Mascotas: 15").unwrap();
        assert_eq!(
            entries,
            vec![
                IndexEntry { name: "Orígenes".into(), page: 2.0 },
                IndexEntry { name: "Lugares Favoritos".into(), page: 5.0 },
                IndexEntry { name: "Mascotas".into(), page: 15.0 },
            ]
        );
    }

    #[test]
    fn index_accepts_fractional_orders() {
        let entries = parse_index("Extra:2.5").unwrap();
        assert_eq!(entries[0].page, 2.5);
    }

    #[test]
    fn index_name_may_contain_colon() {
        let entries = parse_index("Dune: Part Two:3").unwrap();
        assert_eq!(entries[0].name, "Dune: Part Two");
        assert_eq!(entries[0].page, 3.0);
    }

    #[test]
    fn index_skips_trailing_pipe() {
        assert_eq!(parse_index("A:1 |").unwrap().len(), 1);
        assert!(parse_index("").unwrap().is_empty());
    }

    #[test]
    fn index_missing_number_is_error() {
        assert_eq!(
            parse_index("A:1 | Vacaciones"),
            Err(ContentError::MissingPageNumber("Vacaciones".into()))
        );
        assert_eq!(
            parse_index("Vacaciones:"),
            Err(ContentError::MissingPageNumber("Vacaciones:".into()))
        );
    }

    #[test]
    fn index_bad_number_is_error() {
        let err = parse_index("Vacaciones:dieciocho").unwrap_err();
        assert!(matches!(err, ContentError::InvalidPageNumber { .. }));
        assert!(err.to_string().contains("dieciocho"));
    }

    #[test]
    fn index_empty_name_is_error() {
        assert_eq!(
            parse_index(":4"),
            Err(ContentError::EmptyName(":4".into()))
        );
    }
}
