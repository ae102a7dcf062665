//! Row model adapter
//!
//! The two surface encodings (nested block rows, table rows) normalize
//! into one `Row` sequence so discovery, classification, and assembly
//! are written once. A row is a label/content pair; single-cell rows
//! have no label.

use exmark_proto::dom::{Element, Node};

use crate::config::GENERIC_MARKER;

/// Surface encoding of a component region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Block,
    Table,
}

/// One normalized row of a component declaration
#[derive(Debug, Clone)]
pub struct Row<'a> {
    /// Trimmed label cell text; None for single-cell rows or blank labels
    pub label: Option<String>,
    /// The content cell
    pub content: &'a Element,
    /// Label cell was typographically bolded: always treat as slot
    pub emphasized: bool,
}

impl<'a> Row<'a> {
    /// Lower-cased label for reserved-word comparison
    pub fn label_key(&self) -> Option<String> {
        self.label.as_ref().map(|label| label.to_ascii_lowercase())
    }

    /// Trimmed text of the content cell
    pub fn text(&self) -> String {
        self.content.text_content().trim().to_string()
    }
}

/// Extract the row sequence of a region in either encoding
pub fn rows_of(region: &Element, encoding: Encoding) -> Vec<Row<'_>> {
    match encoding {
        Encoding::Block => block_rows(region),
        Encoding::Table => table_rows(region),
    }
}

fn block_rows(region: &Element) -> Vec<Row<'_>> {
    region
        .element_children()
        .map(|row_el| {
            let cells: Vec<&Element> = row_el.element_children().collect();
            match cells.len() {
                // bare row content with no cell wrapper
                0 => Row {
                    label: None,
                    content: row_el,
                    emphasized: false,
                },
                1 => Row {
                    label: None,
                    content: cells[0],
                    emphasized: false,
                },
                _ => make_labeled_row(cells[0], cells[1]),
            }
        })
        .collect()
}

fn table_rows(table: &Element) -> Vec<Row<'_>> {
    collect_table_rows(table)
        .into_iter()
        .skip(1) // the marker row
        .filter_map(|tr| {
            let cells: Vec<&Element> = tr
                .element_children()
                .filter(|cell| cell.tag == "td" || cell.tag == "th")
                .collect();
            match cells.len() {
                0 => None,
                1 => Some(Row {
                    label: None,
                    content: cells[0],
                    emphasized: false,
                }),
                _ => Some(make_labeled_row(cells[0], cells[1])),
            }
        })
        .collect()
}

fn make_labeled_row<'a>(label_cell: &'a Element, content: &'a Element) -> Row<'a> {
    let label = label_cell.text_content().trim().to_string();
    Row {
        label: (!label.is_empty()).then_some(label),
        content,
        emphasized: contains_emphasis(label_cell),
    }
}

/// `tr` elements of a table in document order, descending through
/// section wrappers
pub fn collect_table_rows(table: &Element) -> Vec<&Element> {
    let mut rows = Vec::new();
    for child in table.element_children() {
        match child.tag.as_str() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => {
                rows.extend(child.element_children().filter(|el| el.tag == "tr"));
            }
            _ => {}
        }
    }
    rows
}

/// True when the first table row is a single wide cell holding the
/// generic marker text
pub fn table_has_marker(table: &Element) -> bool {
    let rows = collect_table_rows(table);
    let Some(first) = rows.first() else {
        return false;
    };
    let cells: Vec<&Element> = first
        .element_children()
        .filter(|cell| cell.tag == "td" || cell.tag == "th")
        .collect();
    cells.len() == 1 && cells[0].text_content().trim().eq_ignore_ascii_case(GENERIC_MARKER)
}

/// A content cell wrapping exactly one structureless block element.
/// The classifier unwraps these instead of treating them as rich
/// content.
pub fn is_plain_paragraph(cell: &Element) -> bool {
    let elements: Vec<&Element> = cell.element_children().collect();
    let [only] = elements.as_slice() else {
        return false;
    };
    let wraps = matches!(only.tag.as_str(), "p" | "div");
    wraps
        && !only.has_element_children()
        && cell.children.iter().all(|child| match child {
            Node::Element(_) => true,
            text => text.is_blank_text(),
        })
}

fn contains_emphasis(cell: &Element) -> bool {
    cell.element_children().any(|el| {
        matches!(el.tag.as_str(), "strong" | "b") || contains_emphasis(el)
    })
}
