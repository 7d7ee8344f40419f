//! Headless markup for a table.
//!
//! Builds the element tree a host would render for a [`TableState`]: a
//! scrolling viewport wrapping the table, one header row, and one body row
//! per row on the current page. Cells carry the column ID attribute the
//! pinning engine keys on; body rows carry the row attributes keyboard
//! navigation keys on.

use weft_dom::{Element, ScrollMetrics};

use super::column::ColumnId;
use super::state::TableState;

/// Attribute holding a cell's column ID.
pub const COLUMN_ATTR: &str = "data-column-id";
/// Attribute holding a body row's row ID.
pub const ROW_ATTR: &str = "data-row-id";
/// Attribute holding a body row's index on the current page.
pub const ROW_INDEX_ATTR: &str = "data-row-index";

/// Element IDs for one table's markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMarkup {
    pub viewport_id: String,
    pub table_id: String,
}

impl TableMarkup {
    pub fn for_table(table: &TableState) -> Self {
        let base = table.id().to_string();
        Self {
            viewport_id: format!("{base}-viewport"),
            table_id: base,
        }
    }

    pub fn header_cell_id(&self, column: &ColumnId) -> String {
        format!("{}-th-{}", self.table_id, column)
    }

    pub fn row_id(&self, row: &str) -> String {
        format!("{}-row-{}", self.table_id, row)
    }

    pub fn cell_id(&self, row: &str, column: &ColumnId) -> String {
        format!("{}-td-{}-{}", self.table_id, row, column)
    }

    /// Build the tree for the current page of `table`.
    ///
    /// `width_of` gives each visible column's rendered width; the viewport
    /// is `viewport_width` wide and its scroll extent is the sum of widths.
    pub fn render(
        &self,
        table: &TableState,
        viewport_width: f32,
        width_of: impl Fn(&ColumnId) -> f32,
    ) -> Element {
        let columns = table.visible_columns();
        let content_width: f32 = columns.iter().map(|c| width_of(&c.id)).sum();

        let header = Element::row().id(format!("{}-header", self.table_id)).children(
            columns.iter().map(|c| {
                Element::header_cell()
                    .id(self.header_cell_id(&c.id))
                    .attr(COLUMN_ATTR, c.id.as_str())
                    .width(width_of(&c.id))
            }),
        );

        let rows = table
            .page_row_ids()
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                Element::row()
                    .id(self.row_id(&row))
                    .attr(ROW_ATTR, row.as_str())
                    .attr(ROW_INDEX_ATTR, index.to_string())
                    .children(columns.iter().map(|c| {
                        Element::cell()
                            .id(self.cell_id(&row, &c.id))
                            .attr(COLUMN_ATTR, c.id.as_str())
                            .width(width_of(&c.id))
                    }))
            });

        let table_el = Element::table()
            .id(self.table_id.clone())
            .width(content_width)
            .child(Element::head().child(header))
            .child(Element::body().children(rows));

        Element::box_()
            .id(self.viewport_id.clone())
            .width(viewport_width)
            .scroll(ScrollMetrics::new(0.0, content_width, viewport_width))
            .child(table_el)
    }
}
