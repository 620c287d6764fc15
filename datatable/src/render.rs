//! Table rendering.
//!
//! [`DataTable::render`] builds a [`TableView`] from the current state on every
//! call. The view is plain data: hosts can draw it however they like, or print
//! it with its `Display` implementation.

use std::fmt;

use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::{Alignment, ColumnWidth};
use crate::config::ExportFormat;
use crate::edit::{CellRef, InputKind};
use crate::row::TableRow;
use crate::sort::SortDirection;
use crate::state::DataTable;

/// Placeholder rows shown while loading are capped at this many.
const MAX_SKELETON_ROWS: usize = 10;

/// Page numbers shown on each side of the current page.
const PAGE_WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortIndicator {
    None,
    Asc,
    Desc,
}

impl SortIndicator {
    fn symbol(&self) -> &'static str {
        match self {
            SortIndicator::None => "",
            SortIndicator::Asc => " ▲",
            SortIndicator::Desc => " ▼",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolbarView {
    pub title: Option<String>,
    pub refresh: bool,
    /// Empty when no export callback is registered.
    pub export_formats: Vec<ExportFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub field: String,
    pub label: String,
    pub sortable: bool,
    pub sort: SortIndicator,
    pub align: Alignment,
    pub width: ColumnWidth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionButton {
    pub key: String,
    pub label: String,
    pub icon: String,
    pub class: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    Display,
    /// The editor is open on this cell.
    Editing { input: InputKind, value: String },
    /// A commit is waiting for the edit handler.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView {
    pub field: String,
    pub text: String,
    pub align: Alignment,
    pub editable: bool,
    pub state: CellState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    /// Clicking the row reports it to the host.
    pub clickable: bool,
    pub cells: Vec<CellView>,
    pub actions: Vec<ActionButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyView {
    Loading,
    Skeleton { rows: usize },
    Empty { message: String, icon: String },
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: usize,
    pub page_count: usize,
    pub total_items: usize,
    /// 1-based index of the first item on the page.
    pub first_item: usize,
    pub last_item: usize,
    pub pages: Vec<usize>,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeView {
    pub current: usize,
    pub options: Vec<usize>,
}

/// Everything needed to draw a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub container_id: String,
    pub toolbar: ToolbarView,
    pub headers: Vec<HeaderCell>,
    pub has_actions: bool,
    pub body: BodyView,
    /// `None` when there is at most one page.
    pub pagination: Option<PaginationView>,
    pub page_size: Option<PageSizeView>,
}

/// Headers and formatted visible rows, for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportSnapshot {
    pub fields: Vec<String>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportSnapshot {
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_csv_line(&mut out, &self.headers);
        for row in &self.rows {
            push_csv_line(&mut out, row);
        }
        out
    }

    /// Rows as an array of objects keyed by field.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let records: Vec<serde_json::Map<String, serde_json::Value>> = self
            .rows
            .iter()
            .map(|row| {
                self.fields
                    .iter()
                    .zip(row)
                    .map(|(field, text)| (field.clone(), serde_json::Value::String(text.clone())))
                    .collect()
            })
            .collect();
        serde_json::to_string_pretty(&records)
    }

    pub fn render(&self, format: ExportFormat) -> serde_json::Result<String> {
        match format {
            ExportFormat::Csv => Ok(self.to_csv()),
            ExportFormat::Json => self.to_json(),
        }
    }
}

fn push_csv_line(out: &mut String, values: &[String]) {
    let line: Vec<String> = values
        .iter()
        .map(|v| {
            if v.contains([',', '"', '\n', '\r']) {
                format!("\"{}\"", v.replace('"', "\"\""))
            } else {
                v.clone()
            }
        })
        .collect();
    out.push_str(&line.join(","));
    out.push('\n');
}

impl<R: TableRow> DataTable<R> {
    /// Build the view of the current state.
    pub fn render(&self) -> TableView {
        TableView {
            container_id: self.container_id.clone(),
            toolbar: self.render_toolbar(),
            headers: self.render_headers(),
            has_actions: !self.actions.is_empty(),
            body: self.render_body(),
            pagination: self.render_pagination(),
            page_size: self.render_page_size(),
        }
    }

    fn render_toolbar(&self) -> ToolbarView {
        ToolbarView {
            title: self.options.title.clone(),
            refresh: self.callbacks.on_refresh.is_some(),
            export_formats: if self.callbacks.on_export.is_some() {
                self.options.export_formats.clone()
            } else {
                Vec::new()
            },
        }
    }

    fn render_headers(&self) -> Vec<HeaderCell> {
        self.columns
            .iter()
            .map(|column| {
                let sortable = self.options.sortable && column.sortable;
                let sort = match &self.state.sort_field {
                    Some(f) if sortable && *f == column.field => match self.state.sort_direction {
                        SortDirection::Asc => SortIndicator::Asc,
                        SortDirection::Desc => SortIndicator::Desc,
                    },
                    _ => SortIndicator::None,
                };
                HeaderCell {
                    field: column.field.clone(),
                    label: column.label.clone(),
                    sortable,
                    sort,
                    align: column.align,
                    width: column.width,
                }
            })
            .collect()
    }

    fn render_body(&self) -> BodyView {
        if self.state.loading {
            if self.options.skeleton {
                return BodyView::Skeleton {
                    rows: self.state.items_per_page.min(MAX_SKELETON_ROWS),
                };
            }
            return BodyView::Loading;
        }
        if self.state.rows.is_empty() {
            return BodyView::Empty {
                message: self.options.empty_message.clone(),
                icon: self.options.empty_icon.clone(),
            };
        }

        let offset = self.visible_offset();
        let rows = self
            .visible_rows()
            .iter()
            .enumerate()
            .map(|(i, row)| self.render_row(offset + i, row))
            .collect();
        BodyView::Rows(rows)
    }

    /// Index into `rows` of the first visible row.
    fn visible_offset(&self) -> usize {
        if self.options.server_side_pagination || !self.options.pagination {
            0
        } else {
            (self.state.current_page - 1) * self.state.items_per_page
        }
    }

    fn render_row(&self, index: usize, row: &R) -> RowView {
        let id = self.row_id_at(index, row);
        let cells = self
            .columns
            .iter()
            .map(|column| {
                let cell = CellRef::new(id.as_str(), column.field.as_str());
                let state = match &self.editor {
                    Some(editor) if editor.cell == cell => CellState::Editing {
                        input: editor.input,
                        value: editor.initial.clone(),
                    },
                    _ if self.state.pending_cells.contains(&cell) => CellState::Pending,
                    _ => CellState::Display,
                };
                CellView {
                    field: column.field.clone(),
                    text: column.display(row),
                    align: column.align,
                    editable: self.is_cell_editable(&column.field),
                    state,
                }
            })
            .collect();
        let actions = self
            .actions
            .iter()
            .filter(|a| a.is_visible(row))
            .map(|a| ActionButton {
                key: a.key.clone(),
                label: a.label.clone(),
                icon: a.icon.clone(),
                class: a.class.clone(),
            })
            .collect();
        RowView {
            id,
            clickable: self.has_row_click(),
            cells,
            actions,
        }
    }

    fn render_pagination(&self) -> Option<PaginationView> {
        let page_count = self.page_count();
        if !self.options.pagination || page_count <= 1 {
            return None;
        }
        let current = self.state.current_page;
        let first = current.saturating_sub(PAGE_WINDOW).max(1);
        let last = (current + PAGE_WINDOW).min(page_count);
        let ipp = self.state.items_per_page;
        Some(PaginationView {
            current_page: current,
            page_count,
            total_items: self.state.total_items,
            first_item: (current - 1) * ipp + 1,
            last_item: (current * ipp).min(self.state.total_items),
            pages: (first..=last).collect(),
            has_previous: current > 1,
            has_next: current < page_count,
        })
    }

    fn render_page_size(&self) -> Option<PageSizeView> {
        if !self.options.pagination || self.callbacks.on_page_size_change.is_none() {
            return None;
        }
        Some(PageSizeView {
            current: self.state.items_per_page,
            options: self.options.page_size_options.clone(),
        })
    }

    /// Headers and formatted visible rows.
    pub fn export_snapshot(&self) -> ExportSnapshot {
        ExportSnapshot {
            fields: self.columns.iter().map(|c| c.field.clone()).collect(),
            headers: self.columns.iter().map(|c| c.label.clone()).collect(),
            rows: self
                .visible_rows()
                .iter()
                .map(|row| self.columns.iter().map(|c| c.display(row)).collect())
                .collect(),
        }
    }
}

// =============================================================================
// Text rendering
// =============================================================================

fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut width = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize, align: Alignment) -> String {
    let gap = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(gap)),
        Alignment::Right => format!("{}{}", " ".repeat(gap), text),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(gap - left))
        }
    }
}

impl TableView {
    fn header_text(header: &HeaderCell) -> String {
        format!("{}{}", header.label, header.sort.symbol())
    }

    fn cell_text(cell: &CellView) -> String {
        match &cell.state {
            CellState::Display => cell.text.clone(),
            CellState::Editing { value, .. } => format!("[{}]", value),
            CellState::Pending => format!("{}…", cell.text),
        }
    }

    fn action_text(row: &RowView) -> String {
        row.actions
            .iter()
            .map(|a| a.label.as_str())
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Display width of every column, including the actions column if any.
    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| Self::header_text(h).width())
            .collect();
        if let BodyView::Rows(rows) = &self.body {
            for row in rows {
                for (i, cell) in row.cells.iter().enumerate() {
                    if let Some(w) = widths.get_mut(i) {
                        *w = (*w).max(Self::cell_text(cell).width());
                    }
                }
            }
        }
        for (i, header) in self.headers.iter().enumerate() {
            if let ColumnWidth::Fixed(max) = header.width {
                widths[i] = widths[i].min(usize::from(max).max(1));
            }
        }
        if self.has_actions {
            let mut w = "Actions".width();
            if let BodyView::Rows(rows) = &self.body {
                for row in rows {
                    w = w.max(Self::action_text(row).width());
                }
            }
            widths.push(w);
        }
        widths
    }
}

impl fmt::Display for TableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(title) = &self.toolbar.title {
            writeln!(f, "{}", title)?;
        }

        let widths = self.column_widths();
        let mut header_cells: Vec<String> = self
            .headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| pad(&truncate(&Self::header_text(h), *w), *w, h.align))
            .collect();
        if self.has_actions
            && let Some(w) = widths.last()
        {
            header_cells.push(pad("Actions", *w, Alignment::Left));
        }
        let header_line = header_cells.join(" | ");
        writeln!(f, "{}", header_line.trim_end())?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "{}", rule.join("-+-"))?;

        match &self.body {
            BodyView::Loading => writeln!(f, "Loading...")?,
            BodyView::Skeleton { rows } => {
                let line: Vec<String> = widths.iter().map(|w| "░".repeat(*w)).collect();
                for _ in 0..*rows {
                    writeln!(f, "{}", line.join(" | "))?;
                }
            }
            BodyView::Empty { message, .. } => writeln!(f, "{}", message)?,
            BodyView::Rows(rows) => {
                for row in rows {
                    let mut cells: Vec<String> = row
                        .cells
                        .iter()
                        .zip(&widths)
                        .map(|(c, w)| pad(&truncate(&Self::cell_text(c), *w), *w, c.align))
                        .collect();
                    if self.has_actions
                        && let Some(w) = widths.last()
                    {
                        cells.push(pad(&Self::action_text(row), *w, Alignment::Left));
                    }
                    writeln!(f, "{}", cells.join(" | ").trim_end())?;
                }
            }
        }

        if let Some(p) = &self.pagination {
            let pages: Vec<String> = p
                .pages
                .iter()
                .map(|n| {
                    if *n == p.current_page {
                        format!("[{}]", n)
                    } else {
                        n.to_string()
                    }
                })
                .collect();
            writeln!(
                f,
                "Showing {}-{} of {}  {} {} {}",
                p.first_item,
                p.last_item,
                p.total_items,
                if p.has_previous { "«" } else { " " },
                pages.join(" "),
                if p.has_next { "»" } else { " " },
            )?;
        }
        Ok(())
    }
}
