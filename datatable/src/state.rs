//! Table state and the `DataTable` component.

use std::collections::HashSet;
use std::sync::Arc;

use crate::action::ActionSpec;
use crate::column::ColumnSpec;
use crate::config::{
    Callbacks, EditHandler, ExportFormat, RowClickCallback, TableConfig, TableOptions,
};
use crate::edit::{
    CellEditor, CellRef, CommitStep, EditOutcome, InputKind, PendingEdit, editor_text,
    normalized_eq, parse_input,
};
use crate::error::{EditError, TableError};
use crate::events::EventResult;
use crate::mount::MountPoints;
use crate::notify::Notifier;
use crate::row::TableRow;
use crate::sort::{SortDirection, compare_cells};
use crate::value::CellValue;

/// Data and interaction state of a table.
///
/// With server-side pagination `rows` holds the current page only and
/// `total_items` is the remote total. Otherwise `rows` is the full dataset and
/// `total_items == rows.len()`.
#[derive(Debug, Clone)]
pub struct TableState<R> {
    pub rows: Vec<R>,
    pub total_items: usize,
    /// 1-based.
    pub current_page: usize,
    pub items_per_page: usize,
    pub sort_field: Option<String>,
    pub sort_direction: SortDirection,
    pub loading: bool,
    pub editing_cell: Option<CellRef>,
    /// Cells whose commit is waiting for the edit handler.
    pub pending_cells: HashSet<CellRef>,
}

impl<R> TableState<R> {
    fn new(items_per_page: usize) -> Self {
        Self {
            rows: Vec::new(),
            total_items: 0,
            current_page: 1,
            items_per_page,
            sort_field: None,
            sort_direction: SortDirection::Asc,
            loading: false,
            editing_cell: None,
            pending_cells: HashSet::new(),
        }
    }
}

/// A generic data table.
///
/// `DataTable<R>` manages:
/// - column definitions and row action buttons
/// - row data with client- or server-side pagination
/// - header sorting
/// - inline cell editing with per-cell commit locks
///
/// Interactions report back to the host through the callbacks registered on
/// the [`TableConfig`]. The table never fetches data itself.
pub struct DataTable<R: TableRow> {
    pub(crate) container_id: String,
    pub(crate) columns: Vec<ColumnSpec<R>>,
    pub(crate) actions: Vec<ActionSpec<R>>,
    pub(crate) options: TableOptions,
    pub(crate) callbacks: Callbacks,
    on_edit: Option<Arc<dyn EditHandler<R>>>,
    on_row_click: Option<RowClickCallback<R>>,
    notifier: Arc<dyn Notifier>,
    pub(crate) state: TableState<R>,
    pub(crate) editor: Option<CellEditor>,
}

impl<R: TableRow> DataTable<R> {
    /// Create a table mounted into a declared container.
    pub fn new(
        mounts: &MountPoints,
        container_id: impl Into<String>,
        config: TableConfig<R>,
    ) -> Result<Self, TableError> {
        let container_id = container_id.into();
        if !mounts.contains(&container_id) {
            return Err(TableError::MountNotFound(container_id));
        }

        let TableConfig {
            mut columns,
            actions,
            data,
            mut options,
            callbacks,
            on_edit,
            on_row_click,
            value_getters,
            notifier,
        } = config;

        if options.items_per_page == 0 {
            return Err(TableError::ZeroPageSize);
        }

        let mut fields = HashSet::new();
        for column in &columns {
            if !fields.insert(column.field.clone()) {
                return Err(TableError::DuplicateColumn(column.field.clone()));
            }
        }

        for (field, getter) in value_getters {
            let column = columns
                .iter_mut()
                .find(|c| c.field == field)
                .ok_or(TableError::UnknownColumn(field))?;
            column.set_value_getter(getter);
        }

        let mut keys = HashSet::new();
        for action in &actions {
            if !keys.insert(action.key.as_str()) {
                return Err(TableError::DuplicateAction(action.key.clone()));
            }
        }

        for column in columns.iter().filter(|c| c.editable) {
            if !options.editable_columns.contains(&column.field) {
                options.editable_columns.push(column.field.clone());
            }
        }
        if let Some(unknown) = options
            .editable_columns
            .iter()
            .find(|f| !fields.contains(f.as_str()))
        {
            return Err(TableError::UnknownEditableColumn(unknown.clone()));
        }

        let state = TableState::new(options.items_per_page);
        let mut table = Self {
            container_id,
            columns,
            actions,
            options,
            callbacks,
            on_edit,
            on_row_click,
            notifier,
            state,
            editor: None,
        };

        if !data.is_empty() {
            let total = data.len();
            table.update_data(data, total, 1);
        }

        log::debug!(
            "Created table '{}' with {} columns",
            table.container_id,
            table.columns.len()
        );
        Ok(table)
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn state(&self) -> &TableState<R> {
        &self.state
    }

    /// All rows held by the table.
    pub fn rows(&self) -> &[R] {
        &self.state.rows
    }

    pub fn is_server_side(&self) -> bool {
        self.options.server_side_pagination
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    // -------------------------------------------------------------------------
    // Data
    // -------------------------------------------------------------------------

    /// Replace the table data.
    ///
    /// Server-side tables store exactly `rows` as the current page and take
    /// `total_items` as the remote total. Client-side tables take `rows` as the
    /// full dataset, ignore `total_items` and re-apply the active sort.
    /// The page is clamped to the valid range. Clears the loading flag.
    pub fn update_data(&mut self, rows: Vec<R>, total_items: usize, page: usize) {
        if self.options.server_side_pagination {
            self.state.total_items = total_items;
            self.state.rows = rows;
        } else {
            self.state.total_items = rows.len();
            self.state.rows = rows;
            self.apply_sort();
        }
        self.state.current_page = self.clamp_page(page);
        self.state.loading = false;

        if let Some(cell) = self.state.editing_cell.clone()
            && self.find_row(&cell.row_id).is_none()
        {
            self.close_editor();
        }

        log::debug!(
            "Table '{}' updated: {} rows, {} total, page {}",
            self.container_id,
            self.state.rows.len(),
            self.state.total_items,
            self.state.current_page
        );
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state.loading = loading;
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// Number of pages. Zero when there are no items.
    pub fn page_count(&self) -> usize {
        if self.state.total_items == 0 {
            return 0;
        }
        if !self.options.pagination {
            return 1;
        }
        self.state.total_items.div_ceil(self.state.items_per_page)
    }

    /// Clamp a page number to `1..=page_count`. Returns 1 when empty.
    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.page_count().max(1))
    }

    /// Rows shown on the current page.
    pub fn visible_rows(&self) -> &[R] {
        if self.options.server_side_pagination || !self.options.pagination {
            return &self.state.rows;
        }
        let len = self.state.rows.len();
        let start = ((self.state.current_page - 1) * self.state.items_per_page).min(len);
        let end = (start + self.state.items_per_page).min(len);
        &self.state.rows[start..end]
    }

    /// Id of a row: the string form of the row id field, or `#<index>`.
    pub(crate) fn row_id_at(&self, index: usize, row: &R) -> String {
        match row.cell(&self.options.row_id_field) {
            CellValue::Null => format!("#{}", index),
            value => value.to_string(),
        }
    }

    fn row_index(&self, row_id: &str) -> Option<usize> {
        self.state
            .rows
            .iter()
            .enumerate()
            .position(|(i, row)| self.row_id_at(i, row) == row_id)
    }

    /// Where the row of a pending edit is now.
    ///
    /// Rows without an id field are addressed by position, which sorting and
    /// `update_data` change. Those are found again by their snapshot.
    fn pending_row_index(&self, pending: &PendingEdit<R>) -> Option<usize> {
        if !pending.row.cell(&self.options.row_id_field).is_null() {
            return self.row_index(&pending.cell.row_id);
        }
        let rows = &self.state.rows;
        let position = pending
            .cell
            .row_id
            .strip_prefix('#')
            .and_then(|i| i.parse::<usize>().ok());
        if let Some(i) = position
            && rows.get(i) == Some(&pending.row)
        {
            return Some(i);
        }
        rows.iter().position(|row| *row == pending.row)
    }

    /// Find a row by id.
    pub fn find_row(&self, row_id: &str) -> Option<&R> {
        self.row_index(row_id).map(|i| &self.state.rows[i])
    }

    // -------------------------------------------------------------------------
    // Columns and actions
    // -------------------------------------------------------------------------

    pub fn columns(&self) -> &[ColumnSpec<R>] {
        &self.columns
    }

    pub fn column(&self, field: &str) -> Option<&ColumnSpec<R>> {
        self.columns.iter().find(|c| c.field == field)
    }

    /// Modify a column in place.
    ///
    /// The field name itself cannot change.
    pub fn update_column<F>(&mut self, field: &str, f: F) -> Result<(), TableError>
    where
        F: FnOnce(&mut ColumnSpec<R>),
    {
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.field == field)
            .ok_or_else(|| TableError::UnknownColumn(field.to_string()))?;
        f(column);
        column.field = field.to_string();
        if column.editable && !self.options.editable_columns.iter().any(|c| c == field) {
            self.options.editable_columns.push(field.to_string());
        }
        Ok(())
    }

    pub fn actions(&self) -> &[ActionSpec<R>] {
        &self.actions
    }

    pub fn add_action(&mut self, action: ActionSpec<R>) -> Result<(), TableError> {
        if self.actions.iter().any(|a| a.key == action.key) {
            return Err(TableError::DuplicateAction(action.key));
        }
        self.actions.push(action);
        Ok(())
    }

    /// Remove an action. Returns `false` if no action had the key.
    pub fn remove_action(&mut self, key: &str) -> bool {
        let before = self.actions.len();
        self.actions.retain(|a| a.key != key);
        self.actions.len() != before
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Handle a click on a column header.
    ///
    /// Clicking the sorted column toggles the direction. Clicking another
    /// column sorts it ascending.
    pub fn click_header(&mut self, field: &str) -> EventResult {
        if !self.options.sortable {
            return EventResult::Ignored;
        }
        match self.column(field) {
            Some(column) if column.sortable => {}
            _ => return EventResult::Ignored,
        }

        let direction = match &self.state.sort_field {
            Some(current) if current == field => self.state.sort_direction.toggled(),
            _ => SortDirection::Asc,
        };
        self.state.sort_field = Some(field.to_string());
        self.state.sort_direction = direction;

        if !self.options.server_side_pagination {
            self.apply_sort();
        }
        log::debug!(
            "Table '{}' sorted by {} {}",
            self.container_id,
            field,
            direction.as_str()
        );

        if let Some(on_sort) = self.callbacks.on_sort.as_mut() {
            on_sort(field, direction);
        }
        EventResult::Consumed
    }

    /// Set the sort indicator without invoking callbacks.
    ///
    /// Client-side tables re-sort their rows.
    pub fn set_sort_state(&mut self, field: Option<&str>, direction: SortDirection) {
        self.state.sort_field = field.map(str::to_string);
        self.state.sort_direction = direction;
        if !self.options.server_side_pagination {
            self.apply_sort();
        }
    }

    fn apply_sort(&mut self) {
        let Some(field) = self.state.sort_field.clone() else {
            return;
        };
        let Some(column) = self.columns.iter().find(|c| c.field == field) else {
            return;
        };
        let direction = self.state.sort_direction;
        self.state.rows.sort_by(|a, b| {
            compare_cells(&column.value(a), &column.value(b), column.kind, direction)
        });
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    /// Move to a page, clamped to the valid range, and report it to the host.
    pub fn go_to_page(&mut self, page: usize) -> EventResult {
        if !self.options.pagination {
            return EventResult::Ignored;
        }
        let page = self.clamp_page(page);
        self.state.current_page = page;
        log::debug!("Table '{}' moved to page {}", self.container_id, page);
        if let Some(on_page_change) = self.callbacks.on_page_change.as_mut() {
            on_page_change(page);
        }
        EventResult::Consumed
    }

    pub fn next_page(&mut self) -> EventResult {
        if self.state.current_page >= self.page_count() {
            return EventResult::Ignored;
        }
        self.go_to_page(self.state.current_page + 1)
    }

    pub fn previous_page(&mut self) -> EventResult {
        if self.state.current_page <= 1 {
            return EventResult::Ignored;
        }
        self.go_to_page(self.state.current_page - 1)
    }

    /// Change the page size and return to page 1.
    pub fn set_page_size(&mut self, size: usize) -> Result<EventResult, TableError> {
        if size == 0 {
            return Err(TableError::ZeroPageSize);
        }
        self.state.items_per_page = size;
        self.state.current_page = 1;
        if let Some(on_page_size_change) = self.callbacks.on_page_size_change.as_mut() {
            on_page_size_change(size);
        }
        Ok(EventResult::Consumed)
    }

    // -------------------------------------------------------------------------
    // Toolbar and row actions
    // -------------------------------------------------------------------------

    pub fn refresh(&mut self) -> EventResult {
        match self.callbacks.on_refresh.as_mut() {
            Some(on_refresh) => {
                on_refresh();
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    pub fn export(&mut self, format: ExportFormat) -> EventResult {
        if !self.options.export_formats.contains(&format) {
            return EventResult::Ignored;
        }
        match self.callbacks.on_export.as_mut() {
            Some(on_export) => {
                on_export(format);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// Click an action button of a row.
    ///
    /// Hidden actions and unknown rows are ignored.
    pub fn trigger_action(&self, key: &str, row_id: &str) -> EventResult {
        let Some(action) = self.actions.iter().find(|a| a.key == key) else {
            return EventResult::Ignored;
        };
        let Some(row) = self.find_row(row_id) else {
            return EventResult::Ignored;
        };
        if !action.is_visible(row) {
            return EventResult::Ignored;
        }
        action.invoke(row.clone());
        EventResult::Consumed
    }

    /// Click a row. Ignored without an `on_row_click` callback.
    pub fn click_row(&mut self, row_id: &str) -> EventResult {
        let Some(row) = self.find_row(row_id).cloned() else {
            return EventResult::Ignored;
        };
        match self.on_row_click.as_mut() {
            Some(on_row_click) => {
                on_row_click(row);
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    pub(crate) fn has_row_click(&self) -> bool {
        self.on_row_click.is_some()
    }

    // -------------------------------------------------------------------------
    // Inline editing
    // -------------------------------------------------------------------------

    pub fn is_cell_editable(&self, field: &str) -> bool {
        self.options.editable && self.options.editable_columns.iter().any(|c| c == field)
    }

    pub fn is_cell_pending(&self, row_id: &str, field: &str) -> bool {
        self.state
            .pending_cells
            .contains(&CellRef::new(row_id, field))
    }

    pub fn editor(&self) -> Option<&CellEditor> {
        self.editor.as_ref()
    }

    /// Open the editor on a cell, closing any other open editor.
    pub fn begin_edit(&mut self, row_id: &str, field: &str) -> Result<&CellEditor, EditError> {
        if !self.is_cell_editable(field) {
            return Err(EditError::NotEditable {
                field: field.to_string(),
            });
        }
        let kind = self
            .column(field)
            .map(|c| c.kind)
            .ok_or_else(|| EditError::NotEditable {
                field: field.to_string(),
            })?;
        let original = self
            .find_row(row_id)
            .map(|row| row.cell(field))
            .ok_or_else(|| EditError::RowNotFound(row_id.to_string()))?;

        let cell = CellRef::new(row_id, field);
        self.state.editing_cell = Some(cell.clone());
        let editor = self.editor.insert(CellEditor {
            cell,
            input: InputKind::from(kind),
            initial: editor_text(&original, kind),
            original,
        });
        Ok(editor)
    }

    /// Close the editor without committing.
    pub fn cancel_edit(&mut self) -> EventResult {
        let was_open = self.editor.is_some();
        self.close_editor();
        EventResult::from(was_open)
    }

    fn close_editor(&mut self) {
        self.editor = None;
        self.state.editing_cell = None;
    }

    /// First commit phase.
    ///
    /// Unparseable input notifies and closes the editor. An unchanged value
    /// closes the editor without locking. Otherwise the cell is locked until
    /// [`finish_commit`](Self::finish_commit) is called with the returned
    /// pending edit.
    pub fn begin_commit(&mut self, input: &str) -> Result<CommitStep<R>, EditError> {
        let cell = self
            .editor
            .as_ref()
            .map(|e| e.cell.clone())
            .ok_or(EditError::NoActiveEditor)?;

        if self.state.pending_cells.contains(&cell) {
            self.close_editor();
            return Err(EditError::CellLocked {
                row_id: cell.row_id,
                field: cell.field,
            });
        }

        let Some(row) = self.find_row(&cell.row_id).cloned() else {
            self.close_editor();
            return Err(EditError::RowNotFound(cell.row_id));
        };
        let (kind, label) = match self.column(&cell.field) {
            Some(c) => (c.kind, c.label.clone()),
            None => {
                self.close_editor();
                return Err(EditError::NotEditable { field: cell.field });
            }
        };

        let new_value = match parse_input(input, kind) {
            Ok(value) => value,
            Err(message) => {
                self.notifier
                    .error(&format!("Invalid value for {}: {}", label, message));
                self.close_editor();
                return Err(EditError::Invalid {
                    field: cell.field,
                    message,
                });
            }
        };
        let old_value = row.cell(&cell.field);
        self.close_editor();

        if normalized_eq(&old_value, &new_value, kind) {
            return Ok(CommitStep::Unchanged);
        }

        self.state.pending_cells.insert(cell.clone());
        log::debug!("Cell {}.{} locked for commit", cell.row_id, cell.field);
        Ok(CommitStep::Pending(PendingEdit {
            row,
            cell,
            new_value,
            old_value,
        }))
    }

    /// Last commit phase.
    ///
    /// Unlocks the cell. `Ok(true)` writes the new value into the row if it is
    /// still present. Any other result leaves the row untouched and notifies.
    pub fn finish_commit(
        &mut self,
        pending: PendingEdit<R>,
        result: Result<bool, EditError>,
    ) -> EditOutcome {
        self.state.pending_cells.remove(&pending.cell);
        let label = self
            .column(pending.field())
            .map(|c| c.label.clone())
            .unwrap_or_else(|| pending.field().to_string());

        match result {
            Ok(true) => {
                let Some(index) = self.pending_row_index(&pending) else {
                    log::warn!(
                        "Row {} left the table before its edit was applied",
                        pending.cell.row_id
                    );
                    return EditOutcome::Stale;
                };
                let row = &mut self.state.rows[index];
                if !row.set_cell(&pending.cell.field, pending.new_value) {
                    let reason = format!("{} cannot be written", label);
                    self.notifier.error(&format!("Failed to update {}", label));
                    return EditOutcome::Reverted { reason };
                }
                log::debug!(
                    "Cell {}.{} committed",
                    pending.cell.row_id,
                    pending.cell.field
                );
                EditOutcome::Committed
            }
            Ok(false) => {
                self.notifier.error(&format!("Failed to update {}", label));
                EditOutcome::Reverted {
                    reason: "rejected".to_string(),
                }
            }
            Err(err) => {
                log::warn!("Edit of {} failed: {}", pending.cell.field, err);
                self.notifier
                    .error(&format!("Failed to update {}: {}", label, err));
                EditOutcome::Reverted {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Commit the open editor using the configured edit handler.
    ///
    /// Without a handler a changed value is applied directly. A handler that
    /// exceeds the edit timeout counts as a failure. Hosts sharing the table
    /// behind a lock should drive the phases themselves so the lock is not
    /// held while the handler runs.
    pub async fn commit_edit(&mut self, input: &str) -> Result<EditOutcome, EditError> {
        let pending = match self.begin_commit(input)? {
            CommitStep::Unchanged => return Ok(EditOutcome::Unchanged),
            CommitStep::Pending(pending) => pending,
        };
        let Some(handler) = self.on_edit.clone() else {
            return Ok(self.finish_commit(pending, Ok(true)));
        };

        let call = handler.on_edit(
            &pending.row,
            pending.field(),
            &pending.new_value,
            &pending.old_value,
        );
        let result = match self.options.edit_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(EditError::Timeout(limit))),
            None => call.await,
        };
        Ok(self.finish_commit(pending, result))
    }

    /// Run the configured edit handler for a pending edit, honoring the edit timeout.
    ///
    /// Returns `Ok(true)` when no handler is configured.
    pub fn edit_call(&self, pending: &PendingEdit<R>) -> EditCall<R> {
        EditCall {
            handler: self.on_edit.clone(),
            timeout: self.options.edit_timeout,
            row: pending.row.clone(),
            field: pending.cell.field.clone(),
            new_value: pending.new_value.clone(),
            old_value: pending.old_value.clone(),
        }
    }
}

/// A detached edit handler invocation.
///
/// Obtained from [`DataTable::edit_call`] so the handler can run after the
/// table lock is released.
pub struct EditCall<R: TableRow> {
    handler: Option<Arc<dyn EditHandler<R>>>,
    timeout: Option<std::time::Duration>,
    row: R,
    field: String,
    new_value: CellValue,
    old_value: CellValue,
}

impl<R: TableRow> EditCall<R> {
    pub async fn run(self) -> Result<bool, EditError> {
        let Some(handler) = self.handler else {
            return Ok(true);
        };
        let call = handler.on_edit(&self.row, &self.field, &self.new_value, &self.old_value);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(EditError::Timeout(limit))),
            None => call.await,
        }
    }
}

impl<R: TableRow> std::fmt::Debug for DataTable<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataTable")
            .field("container_id", &self.container_id)
            .field("columns", &self.columns.len())
            .field("actions", &self.actions.len())
            .field("rows", &self.state.rows.len())
            .field("total_items", &self.state.total_items)
            .field("current_page", &self.state.current_page)
            .finish_non_exhaustive()
    }
}
