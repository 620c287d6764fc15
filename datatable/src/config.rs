//! Table configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::action::ActionSpec;
use crate::column::{ColumnSpec, ValueGetter};
use crate::error::EditError;
use crate::notify::{LogNotifier, Notifier};
use crate::row::TableRow;
use crate::sort::SortDirection;
use crate::value::CellValue;

/// Export formats offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Persists inline edits.
///
/// Returning `Ok(true)` accepts the new value. `Ok(false)` and errors make the
/// table revert the cell.
#[async_trait]
pub trait EditHandler<R: TableRow>: Send + Sync {
    async fn on_edit(
        &self,
        row: &R,
        field: &str,
        new_value: &CellValue,
        old_value: &CellValue,
    ) -> Result<bool, EditError>;
}

pub(crate) type SortCallback = Box<dyn FnMut(&str, SortDirection) + Send>;
pub(crate) type PageCallback = Box<dyn FnMut(usize) + Send>;
pub(crate) type RefreshCallback = Box<dyn FnMut() + Send>;
pub(crate) type ExportCallback = Box<dyn FnMut(ExportFormat) + Send>;
pub(crate) type RowClickCallback<R> = Box<dyn FnMut(R) + Send>;

/// Host callbacks. Absent callbacks mean the control is not rendered.
#[derive(Default)]
pub(crate) struct Callbacks {
    pub on_sort: Option<SortCallback>,
    pub on_page_change: Option<PageCallback>,
    pub on_page_size_change: Option<PageCallback>,
    pub on_refresh: Option<RefreshCallback>,
    pub on_export: Option<ExportCallback>,
}

/// Non-callback options.
#[derive(Debug, Clone)]
pub(crate) struct TableOptions {
    pub title: Option<String>,
    pub row_id_field: String,
    pub sortable: bool,
    pub pagination: bool,
    pub items_per_page: usize,
    pub page_size_options: Vec<usize>,
    pub server_side_pagination: bool,
    pub editable: bool,
    pub editable_columns: Vec<String>,
    pub edit_timeout: Option<Duration>,
    pub empty_message: String,
    pub empty_icon: String,
    pub skeleton: bool,
    pub export_formats: Vec<ExportFormat>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            title: None,
            row_id_field: "id".to_string(),
            sortable: true,
            pagination: true,
            items_per_page: 20,
            page_size_options: vec![10, 20, 50, 100],
            server_side_pagination: false,
            editable: false,
            editable_columns: Vec::new(),
            edit_timeout: None,
            empty_message: "No records found".to_string(),
            empty_icon: "fas fa-inbox".to_string(),
            skeleton: false,
            export_formats: vec![ExportFormat::Csv, ExportFormat::Json],
        }
    }
}

/// Configuration consumed by [`DataTable::new`](crate::DataTable::new).
///
/// # Examples
///
/// ```ignore
/// let config = TableConfig::new(columns)
///     .title("Parts")
///     .row_id_field("key")
///     .pagination(20)
///     .server_side()
///     .on_sort(|field, dir| log::info!("sort {field} {dir:?}"))
///     .on_page_change(|page| log::info!("page {page}"));
/// ```
pub struct TableConfig<R: TableRow> {
    pub(crate) columns: Vec<ColumnSpec<R>>,
    pub(crate) actions: Vec<ActionSpec<R>>,
    pub(crate) data: Vec<R>,
    pub(crate) options: TableOptions,
    pub(crate) callbacks: Callbacks,
    pub(crate) on_edit: Option<Arc<dyn EditHandler<R>>>,
    pub(crate) on_row_click: Option<RowClickCallback<R>>,
    /// Getters for columns that were declared without one.
    pub(crate) value_getters: Vec<(String, ValueGetter<R>)>,
    pub(crate) notifier: Arc<dyn Notifier>,
}

impl<R: TableRow> TableConfig<R> {
    pub fn new(columns: Vec<ColumnSpec<R>>) -> Self {
        Self {
            columns,
            actions: Vec::new(),
            data: Vec::new(),
            options: TableOptions::default(),
            callbacks: Callbacks::default(),
            on_edit: None,
            on_row_click: None,
            value_getters: Vec::new(),
            notifier: Arc::new(LogNotifier),
        }
    }

    pub fn actions(mut self, actions: Vec<ActionSpec<R>>) -> Self {
        self.actions = actions;
        self
    }

    /// Initial rows.
    pub fn data(mut self, data: Vec<R>) -> Self {
        self.data = data;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.options.title = Some(title.into());
        self
    }

    /// Field holding the row id. Defaults to `id`.
    pub fn row_id_field(mut self, field: impl Into<String>) -> Self {
        self.options.row_id_field = field.into();
        self
    }

    /// Enable or disable header sorting for the whole table.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.options.sortable = sortable;
        self
    }

    /// Enable pagination with the given page size.
    pub fn pagination(mut self, items_per_page: usize) -> Self {
        self.options.pagination = true;
        self.options.items_per_page = items_per_page;
        self
    }

    /// Show all rows on one page.
    pub fn no_pagination(mut self) -> Self {
        self.options.pagination = false;
        self
    }

    /// Rows handed to `update_data` are the current page only.
    pub fn server_side(mut self) -> Self {
        self.options.server_side_pagination = true;
        self
    }

    pub fn page_size_options(mut self, sizes: Vec<usize>) -> Self {
        self.options.page_size_options = sizes;
        self
    }

    /// Enable inline editing for the listed fields.
    pub fn editable<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.editable = true;
        self.options
            .editable_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    /// Bound on how long `on_edit` may take before the edit is reverted.
    pub fn edit_timeout(mut self, timeout: Duration) -> Self {
        self.options.edit_timeout = Some(timeout);
        self
    }

    pub fn empty_state(mut self, message: impl Into<String>, icon: impl Into<String>) -> Self {
        self.options.empty_message = message.into();
        self.options.empty_icon = icon.into();
        self
    }

    /// Show placeholder rows instead of a spinner while loading.
    pub fn skeleton(mut self, skeleton: bool) -> Self {
        self.options.skeleton = skeleton;
        self
    }

    pub fn export_formats(mut self, formats: Vec<ExportFormat>) -> Self {
        self.options.export_formats = formats;
        self
    }

    pub fn on_sort<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str, SortDirection) + Send + 'static,
    {
        self.callbacks.on_sort = Some(Box::new(f));
        self
    }

    pub fn on_page_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.callbacks.on_page_change = Some(Box::new(f));
        self
    }

    pub fn on_page_size_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(usize) + Send + 'static,
    {
        self.callbacks.on_page_size_change = Some(Box::new(f));
        self
    }

    pub fn on_refresh<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.callbacks.on_refresh = Some(Box::new(f));
        self
    }

    pub fn on_export<F>(mut self, f: F) -> Self
    where
        F: FnMut(ExportFormat) + Send + 'static,
    {
        self.callbacks.on_export = Some(Box::new(f));
        self
    }

    pub fn on_edit(mut self, handler: Arc<dyn EditHandler<R>>) -> Self {
        self.on_edit = Some(handler);
        self
    }

    /// Called with a clone of the row when a row is clicked.
    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: FnMut(R) + Send + 'static,
    {
        self.on_row_click = Some(Box::new(f));
        self
    }

    /// Attach a computed value to a column by field name.
    ///
    /// Table construction fails if no column has that field.
    pub fn value_getter<F>(mut self, field: impl Into<String>, getter: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        self.value_getters.push((field.into(), Arc::new(getter)));
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }
}

impl<R: TableRow> fmt::Debug for TableConfig<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("columns", &self.columns)
            .field("actions", &self.actions)
            .field("rows", &self.data.len())
            .field("options", &self.options)
            .field("on_edit", &self.on_edit.is_some())
            .field("on_row_click", &self.on_row_click.is_some())
            .field("value_getters", &self.value_getters.len())
            .finish_non_exhaustive()
    }
}
