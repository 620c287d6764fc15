//! List screen controller.
//!
//! A [`ListScreen`] owns one server-side [`DataTable`] and drives it against a
//! [`Backend`]: filters and sort become list queries, responses become table
//! data, and row actions become backend calls followed by a reload.
//!
//! The table reports interactions through [`TableEvent`]s queued on a channel.
//! Hosts call [`ListScreen::process_events`] after forwarding input to the
//! table, so no table lock is held while the backend is awaited.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use datatable::{
    ActionSpec, CellValue, ColumnSpec, CommitStep, DataTable, EditError, EditHandler, EditOutcome,
    ExportFormat, MountPoints, Notifier, SortDirection, TableConfig, TableRow, TableView,
};
use erp_lib::api::{Backend, Direction, ListQuery, OrderBy};
use erp_lib::error::{Error as BackendError, ValidationErrors};
use erp_lib::model::{ItemAction, Record, Resource, record_id};
use serde_json::Value;
use tokio::sync::mpsc;

use crate::error::ScreenError;
use crate::filters;
use crate::modal::ModalHost;

// =============================================================================
// Screen definitions
// =============================================================================

/// Where the rows of a detail table come from.
#[derive(Debug, Clone, Copy)]
pub enum DetailSource {
    /// An array field of the entity itself.
    Embedded(&'static str),
    /// Another collection, filtered by the entity id.
    Related {
        resource: Resource,
        filter: &'static str,
    },
}

/// The nested table shown in a detail modal.
pub struct DetailSpec {
    pub title: &'static str,
    pub source: DetailSource,
    pub row_id_field: &'static str,
    pub columns: Vec<ColumnSpec<Record>>,
}

/// Per-screen configuration: resource, columns, filters and rules.
pub trait ScreenDefinition: Send + Sync {
    /// Short name, also the prefix of mount point and modal ids.
    fn name(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn resource(&self) -> Resource;

    fn columns(&self) -> Vec<ColumnSpec<Record>>;

    /// Translate a filter input into a query parameter. `None` drops it.
    fn translate_filter(&self, id: &str, value: &str) -> Option<(String, String)> {
        filters::translate_generic(id, value)
    }

    /// Ordering used while no column is sorted.
    fn default_ordering(&self) -> Option<OrderBy> {
        None
    }

    /// Checks run before create and update requests.
    fn validate(&self, _record: &Record) -> Result<(), ValidationErrors> {
        Ok(())
    }

    fn detail(&self) -> Option<DetailSpec> {
        None
    }

    /// Whether an action button is shown for a row.
    fn action_visible(&self, _action: ItemAction, _row: &Record) -> bool {
        true
    }

    fn deletable(&self) -> bool {
        true
    }
}

// =============================================================================
// Events and outcomes
// =============================================================================

/// Interactions reported by the table.
#[derive(Debug, Clone)]
pub enum TableEvent {
    Sort {
        field: String,
        direction: SortDirection,
    },
    PageChange(usize),
    PageSizeChange(usize),
    Refresh,
    Export(ExportFormat),
    Action {
        key: String,
        row: Record,
    },
}

/// Result of a [`ListScreen::load`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded {
        rows: usize,
        total: usize,
        page: usize,
    },
    /// The request failed. The table was emptied and the error notified.
    Failed(String),
    /// Another load was in flight.
    Skipped,
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

/// An opened entity, with its nested table if the screen has one.
#[derive(Debug)]
pub struct DetailView {
    pub record: Record,
    pub items: Option<DataTable<Record>>,
}

/// What handling a [`TableEvent`] produced.
#[derive(Debug)]
pub enum EventReply {
    Loaded(LoadOutcome),
    Exported {
        format: ExportFormat,
        content: String,
    },
    Detail(Box<DetailView>),
    Done,
}

#[derive(Debug, Clone)]
pub struct ScreenOptions {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
    pub edit_timeout: Option<Duration>,
}

impl Default for ScreenOptions {
    fn default() -> Self {
        Self {
            page_size: 20,
            page_size_options: vec![10, 20, 50, 100],
            edit_timeout: Some(Duration::from_secs(15)),
        }
    }
}

// =============================================================================
// Inline edits
// =============================================================================

/// Saves inline edits with a partial update of the row's entity.
struct BackendEditHandler {
    backend: Arc<dyn Backend>,
    resource: Resource,
}

#[async_trait]
impl EditHandler<Record> for BackendEditHandler {
    async fn on_edit(
        &self,
        row: &Record,
        field: &str,
        new_value: &CellValue,
        _old_value: &CellValue,
    ) -> Result<bool, EditError> {
        let id_field = self.resource.id_field();
        let id = record_id(row, id_field)
            .ok_or_else(|| EditError::handler(format!("row has no '{}'", id_field)))?;

        let mut patch = Record::new();
        if !patch.set_cell(field, new_value.clone()) {
            return Ok(false);
        }
        self.backend
            .update(self.resource, &id, &patch)
            .await
            .map_err(EditError::handler)?;
        Ok(true)
    }
}

// =============================================================================
// ListScreen
// =============================================================================

/// Resets the in-flight flag when a load ends, including on cancellation.
struct LoadGuard<'a>(&'a AtomicBool);

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller of one list page.
pub struct ListScreen {
    definition: Arc<dyn ScreenDefinition>,
    backend: Arc<dyn Backend>,
    notifier: Arc<dyn Notifier>,
    modals: Arc<dyn ModalHost>,
    mounts: MountPoints,
    table: Mutex<DataTable<Record>>,
    events: Mutex<mpsc::UnboundedReceiver<TableEvent>>,
    filters: Mutex<Vec<(String, String)>>,
    requested_page: AtomicUsize,
    generation: AtomicU64,
    loading: AtomicBool,
}

impl ListScreen {
    pub fn new(
        definition: Arc<dyn ScreenDefinition>,
        backend: Arc<dyn Backend>,
        notifier: Arc<dyn Notifier>,
        modals: Arc<dyn ModalHost>,
        options: ScreenOptions,
    ) -> Result<Self, ScreenError> {
        let name = definition.name();
        let mounts = MountPoints::new()
            .with(format!("{}-table", name))
            .with(format!("{}-detail-table", name));

        let (tx, rx) = mpsc::unbounded_channel();
        let config = Self::table_config(&definition, &backend, &notifier, &options, tx);
        let table = DataTable::new(&mounts, format!("{}-table", name), config)?;

        log::debug!("Screen '{}' ready", name);
        Ok(Self {
            definition,
            backend,
            notifier,
            modals,
            mounts,
            table: Mutex::new(table),
            events: Mutex::new(rx),
            filters: Mutex::new(Vec::new()),
            requested_page: AtomicUsize::new(1),
            generation: AtomicU64::new(0),
            loading: AtomicBool::new(false),
        })
    }

    fn table_config(
        definition: &Arc<dyn ScreenDefinition>,
        backend: &Arc<dyn Backend>,
        notifier: &Arc<dyn Notifier>,
        options: &ScreenOptions,
        tx: mpsc::UnboundedSender<TableEvent>,
    ) -> TableConfig<Record> {
        let resource = definition.resource();

        let mut actions = vec![
            ActionSpec::new("view", "View", send_action(&tx, "view"))
                .icon("fas fa-eye")
                .class("btn-outline-primary"),
        ];
        for &action in resource.actions() {
            let def = Arc::clone(definition);
            actions.push(
                ActionSpec::new(action.path(), humanize(action.path()), send_action(&tx, action.path()))
                    .visible_when(move |row| def.action_visible(action, row)),
            );
        }
        if definition.deletable() {
            actions.push(
                ActionSpec::new("delete", "Delete", send_action(&tx, "delete"))
                    .icon("fas fa-trash")
                    .class("btn-outline-danger"),
            );
        }

        let on_sort = tx.clone();
        let on_page = tx.clone();
        let on_page_size = tx.clone();
        let on_refresh = tx.clone();
        let on_export = tx;

        let columns = definition.columns();
        let editable = columns.iter().any(|c| c.editable);

        let config = TableConfig::new(columns)
            .title(definition.title())
            .row_id_field(resource.id_field())
            .actions(actions)
            .pagination(options.page_size)
            .server_side()
            .page_size_options(options.page_size_options.clone())
            .empty_state(format!("No {}s found", resource.label()), "fas fa-inbox")
            .notifier(Arc::clone(notifier))
            .on_edit(Arc::new(BackendEditHandler {
                backend: Arc::clone(backend),
                resource,
            }))
            .on_sort(move |field, direction| {
                let _ = on_sort.send(TableEvent::Sort {
                    field: field.to_string(),
                    direction,
                });
            })
            .on_page_change(move |page| {
                let _ = on_page.send(TableEvent::PageChange(page));
            })
            .on_page_size_change(move |size| {
                let _ = on_page_size.send(TableEvent::PageSizeChange(size));
            })
            .on_refresh(move || {
                let _ = on_refresh.send(TableEvent::Refresh);
            })
            .on_export(move |format| {
                let _ = on_export.send(TableEvent::Export(format));
            });

        let config = if editable {
            config.editable(Vec::<String>::new())
        } else {
            config
        };
        match options.edit_timeout {
            Some(timeout) => config.edit_timeout(timeout),
            None => config,
        }
    }

    pub fn definition(&self) -> &dyn ScreenDefinition {
        self.definition.as_ref()
    }

    fn table(&self) -> MutexGuard<'_, DataTable<Record>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a closure against the table.
    ///
    /// Interactions that report to the host queue a [`TableEvent`]; follow up
    /// with [`process_events`](Self::process_events).
    pub fn with_table<T>(&self, f: impl FnOnce(&mut DataTable<Record>) -> T) -> T {
        f(&mut self.table())
    }

    pub fn render(&self) -> TableView {
        self.table().render()
    }

    pub fn detail_modal_id(&self) -> String {
        format!("{}-detail-modal", self.definition.name())
    }

    fn label(&self) -> &'static str {
        self.definition.resource().label()
    }

    // -------------------------------------------------------------------------
    // Filters and queries
    // -------------------------------------------------------------------------

    /// Current filter inputs as `(id, value)` pairs.
    pub fn filters(&self) -> Vec<(String, String)> {
        self.filters
            .lock()
            .map(|f| f.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// Replace the filter inputs without loading.
    ///
    /// A load in flight is restarted with the new filters.
    pub fn set_filters<I, K, V>(&self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values: Vec<(String, String)> = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        log::debug!("{}: filters set to {:?}", self.definition.name(), values);
        *self.filters.lock().unwrap_or_else(PoisonError::into_inner) = values;
        self.restart_at_first_page();
    }

    /// Replace the filter inputs and load the first page.
    pub async fn apply_filters<I, K, V>(&self, values: I) -> LoadOutcome
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.set_filters(values);
        self.load(1).await
    }

    pub async fn clear_filters(&self) -> LoadOutcome {
        self.apply_filters(Vec::<(String, String)>::new()).await
    }

    /// Marks any in-flight response as stale and points it at page 1.
    fn restart_at_first_page(&self) {
        self.requested_page.store(1, Ordering::Release);
        self.generation.fetch_add(1, Ordering::AcqRel);
    }

    /// The list query for a page under the current filters and sort.
    pub fn build_query(&self, page: usize) -> ListQuery {
        let mut query = ListQuery::new();
        for (id, value) in self.filters() {
            if let Some((name, value)) = self.definition.translate_filter(&id, &value) {
                query.set_filter(name, value);
            }
        }

        let (page_size, ordering) = {
            let table = self.table();
            let state = table.state();
            let ordering = state.sort_field.as_deref().map(|field| {
                let direction = match state.sort_direction {
                    SortDirection::Asc => Direction::Asc,
                    SortDirection::Desc => Direction::Desc,
                };
                OrderBy::new(field.replace('.', "__"), direction)
            });
            (state.items_per_page, ordering)
        };

        let query = query.page(page).page_size(page_size);
        match ordering.or_else(|| self.definition.default_ordering()) {
            Some(order) => query.order_by(order),
            None => query,
        }
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Load a page into the table.
    ///
    /// Dropped while another load is in flight. When filters or sort change
    /// during the request, its response is discarded and the query is re-run
    /// with the current parameters. Failures empty the table and notify once.
    pub async fn load(&self, page: usize) -> LoadOutcome {
        let name = self.definition.name();
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("{}: load of page {} skipped, one is in flight", name, page);
            return LoadOutcome::Skipped;
        }
        let _guard = LoadGuard(&self.loading);

        self.requested_page.store(page.max(1), Ordering::Release);
        self.table().set_loading(true);

        loop {
            let generation = self.generation.load(Ordering::Acquire);
            let page = self.requested_page.load(Ordering::Acquire);
            let query = self.build_query(page);
            log::debug!("{}: loading {}", name, query.to_query_string());

            let result = self.backend.list(self.definition.resource(), &query).await;

            if self.generation.load(Ordering::Acquire) != generation {
                log::debug!("{}: discarding stale response for page {}", name, page);
                continue;
            }

            return match result {
                Ok(list) => {
                    let (rows, total) = list.into_parts();
                    let count = rows.len();
                    let mut table = self.table();
                    table.update_data(rows, total, page);
                    LoadOutcome::Loaded {
                        rows: count,
                        total,
                        page: table.state().current_page,
                    }
                }
                Err(err) => {
                    log::error!("{}: load failed: {}", name, err);
                    self.table().update_data(Vec::new(), 0, page);
                    let message = format!("Failed to load {}s: {}", self.label(), err);
                    self.notifier.error(&message);
                    LoadOutcome::Failed(message)
                }
            };
        }
    }

    /// Load the current page again.
    pub async fn reload(&self) -> LoadOutcome {
        let page = self.table().state().current_page;
        self.load(page).await
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// Handle every event the table queued since the last call.
    pub async fn process_events(&self) -> Vec<Result<EventReply, ScreenError>> {
        let events: Vec<TableEvent> = {
            let mut rx = self.events.lock().unwrap_or_else(PoisonError::into_inner);
            std::iter::from_fn(|| rx.try_recv().ok()).collect()
        };

        let mut replies = Vec::with_capacity(events.len());
        for event in events {
            replies.push(self.handle_event(event).await);
        }
        replies
    }

    pub async fn handle_event(&self, event: TableEvent) -> Result<EventReply, ScreenError> {
        match event {
            TableEvent::Sort { field, direction } => {
                log::debug!("{}: sorted by {} {}", self.definition.name(), field, direction.as_str());
                self.restart_at_first_page();
                Ok(EventReply::Loaded(self.load(1).await))
            }
            TableEvent::PageChange(page) => Ok(EventReply::Loaded(self.load(page).await)),
            TableEvent::PageSizeChange(_) => {
                self.restart_at_first_page();
                Ok(EventReply::Loaded(self.load(1).await))
            }
            TableEvent::Refresh => Ok(EventReply::Loaded(self.reload().await)),
            TableEvent::Export(format) => {
                let content = self.export(format)?;
                Ok(EventReply::Exported { format, content })
            }
            TableEvent::Action { key, row } => self.handle_action(&key, &row).await,
        }
    }

    async fn handle_action(&self, key: &str, row: &Record) -> Result<EventReply, ScreenError> {
        let id_field = self.definition.resource().id_field();
        let Some(id) = record_id(row, id_field) else {
            self.notifier
                .error(&format!("Cannot {} a {} without {}", key, self.label(), id_field));
            return Err(ScreenError::MissingId(id_field.to_string()));
        };

        match key {
            "view" => Ok(EventReply::Detail(Box::new(self.open_detail(&id).await?))),
            "delete" => {
                self.delete(&id).await?;
                Ok(EventReply::Done)
            }
            other => {
                let action = other.parse::<ItemAction>().map_err(|_| {
                    self.notifier.error(&format!("Unknown action '{}'", other));
                    ScreenError::UnknownAction(other.to_string())
                })?;
                self.run_action(&id, action).await?;
                Ok(EventReply::Done)
            }
        }
    }

    /// Render the visible rows for download.
    pub fn export(&self, format: ExportFormat) -> Result<String, ScreenError> {
        let snapshot = self.table().export_snapshot();
        snapshot.render(format).map_err(|err| {
            self.notifier.error(&format!("Export failed: {}", err));
            ScreenError::Export(err)
        })
    }

    // -------------------------------------------------------------------------
    // Entity operations
    // -------------------------------------------------------------------------

    fn report(&self, context: &str, err: BackendError) -> ScreenError {
        log::error!("{}: {}", context, err);
        self.notifier.error(&format!("{}: {}", context, err));
        ScreenError::Backend(err)
    }

    /// Fetch an entity, build its nested table and open the detail modal.
    pub async fn open_detail(&self, id: &str) -> Result<DetailView, ScreenError> {
        let resource = self.definition.resource();
        let record = self
            .backend
            .retrieve(resource, id)
            .await
            .map_err(|e| self.report(&format!("Failed to load {} {}", self.label(), id), e))?;

        let items = match self.definition.detail() {
            None => None,
            Some(spec) => {
                let rows = match spec.source {
                    DetailSource::Embedded(field) => embedded_rows(&record, field),
                    DetailSource::Related { resource, filter } => {
                        let query = ListQuery::new().filter(filter, id);
                        self.backend
                            .list(resource, &query)
                            .await
                            .map_err(|e| {
                                self.report(&format!("Failed to load {}s", resource.label()), e)
                            })?
                            .into_parts()
                            .0
                    }
                };
                let config = TableConfig::new(spec.columns)
                    .title(spec.title)
                    .row_id_field(spec.row_id_field)
                    .no_pagination()
                    .notifier(Arc::clone(&self.notifier))
                    .data(rows);
                let container = format!("{}-detail-table", self.definition.name());
                let table = DataTable::new(&self.mounts, container, config).map_err(|e| {
                    self.notifier.error(&e.to_string());
                    ScreenError::Table(e)
                })?;
                Some(table)
            }
        };

        self.modals.open(&self.detail_modal_id());
        Ok(DetailView { record, items })
    }

    pub fn close_detail(&self) {
        self.modals.close(&self.detail_modal_id());
    }

    /// Validate, then create (`id == None`) or update an entity and reload.
    pub async fn save(&self, id: Option<&str>, record: Record) -> Result<Record, ScreenError> {
        if let Err(errors) = self.definition.validate(&record) {
            log::warn!("{}: validation failed: {}", self.definition.name(), errors);
            self.notifier.error(&errors.to_string());
            return Err(errors.into());
        }

        let resource = self.definition.resource();
        let result = match id {
            Some(id) => self.backend.update(resource, id, &record).await,
            None => self.backend.create(resource, &record).await,
        };
        let saved = result.map_err(|e| self.report(&format!("Failed to save {}", self.label()), e))?;

        let verb = if id.is_some() { "updated" } else { "created" };
        self.notifier
            .success(&format!("{} {}", capitalize(self.label()), verb));
        self.modals.close(&self.detail_modal_id());
        self.reload().await;
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ScreenError> {
        self.backend
            .delete(self.definition.resource(), id)
            .await
            .map_err(|e| self.report(&format!("Failed to delete {} {}", self.label(), id), e))?;
        self.notifier
            .success(&format!("{} {} deleted", capitalize(self.label()), id));
        self.reload().await;
        Ok(())
    }

    /// Run an item action (approve, cancel, mark completed, ...) and reload.
    pub async fn run_action(&self, id: &str, action: ItemAction) -> Result<(), ScreenError> {
        let resource = self.definition.resource();
        if !resource.supports(action) {
            self.notifier.error(&format!(
                "Cannot {} a {}",
                humanize(action.path()).to_lowercase(),
                self.label()
            ));
            return Err(ScreenError::UnsupportedAction { resource, action });
        }

        self.backend
            .action(resource, id, action, None)
            .await
            .map_err(|e| {
                self.report(
                    &format!("Failed to {} {} {}", humanize(action.path()).to_lowercase(), self.label(), id),
                    e,
                )
            })?;
        self.notifier.success(&format!(
            "{} {} {}",
            capitalize(self.label()),
            id,
            action.done()
        ));
        self.reload().await;
        Ok(())
    }

    /// Create many entities in one request and reload.
    ///
    /// Returns the number of submitted records. Itemized backend rejections
    /// are notified with their per-item messages.
    pub async fn bulk_create(&self, records: Vec<Record>) -> Result<usize, ScreenError> {
        let mut errors = ValidationErrors::new();
        for (i, record) in records.iter().enumerate() {
            if let Err(item) = self.definition.validate(record) {
                for e in item.errors() {
                    errors.push(format!("Item {} {}", i + 1, e.field), e.message.clone());
                }
            }
        }
        if !errors.is_empty() {
            self.notifier.error(&errors.to_string());
            return Err(errors.into());
        }

        let resource = self.definition.resource();
        if let Err(err) = self.backend.bulk_create(resource, &records).await {
            let message = match &err {
                BackendError::BulkCreate(bulk) => bulk.to_string(),
                other => format!("Failed to create {}s: {}", self.label(), other),
            };
            log::error!("{}: {}", self.definition.name(), message);
            self.notifier.error(&message);
            return Err(err.into());
        }

        self.notifier
            .success(&format!("{} {}s created", records.len(), self.label()));
        self.reload().await;
        Ok(records.len())
    }

    /// Open an editor on a cell and commit `input` through the backend.
    ///
    /// The table lock is released while the update request runs.
    pub async fn edit_cell(
        &self,
        row_id: &str,
        field: &str,
        input: &str,
    ) -> Result<EditOutcome, ScreenError> {
        let (pending, call) = {
            let mut table = self.table();
            if let Err(err) = table.begin_edit(row_id, field) {
                self.notifier.error(&err.to_string());
                return Err(err.into());
            }
            match table.begin_commit(input) {
                Ok(CommitStep::Unchanged) => return Ok(EditOutcome::Unchanged),
                Ok(CommitStep::Pending(pending)) => {
                    let call = table.edit_call(&pending);
                    (pending, call)
                }
                Err(err @ EditError::CellLocked { .. }) => {
                    self.notifier
                        .warning(&format!("{} is still being saved", field));
                    return Err(err.into());
                }
                // Already notified by the table.
                Err(err) => return Err(err.into()),
            }
        };

        let result = call.run().await;
        Ok(self.table().finish_commit(pending, result))
    }
}

impl std::fmt::Debug for ListScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListScreen")
            .field("name", &self.definition.name())
            .field("generation", &self.generation.load(Ordering::Relaxed))
            .field("loading", &self.loading.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

fn send_action(
    tx: &mpsc::UnboundedSender<TableEvent>,
    key: &'static str,
) -> impl Fn(Record) + Send + Sync + 'static {
    let tx = tx.clone();
    move |row| {
        let _ = tx.send(TableEvent::Action {
            key: key.to_string(),
            row,
        });
    }
}

fn embedded_rows(record: &Record, field: &str) -> Vec<Record> {
    record
        .get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(|v| v.as_object().cloned()).collect())
        .unwrap_or_default()
}

/// `mark_completed` → `Mark completed`.
pub(crate) fn humanize(path: &str) -> String {
    capitalize(&path.replace('_', " "))
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize() {
        assert_eq!(humanize("mark_completed"), "Mark completed");
        assert_eq!(humanize("approve"), "Approve");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_embedded_rows_skip_non_objects() {
        let record = serde_json::json!({"entries": [{"user": 1}, 3, {"user": 2}]});
        let Value::Object(record) = record else { unreachable!() };
        assert_eq!(embedded_rows(&record, "entries").len(), 2);
        assert!(embedded_rows(&record, "items").is_empty());
    }
}
