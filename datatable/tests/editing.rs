//! Inline editing: commit, revert, no-op detection and cell locks.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use datatable::{
    CellValue, ColumnSpec, CommitStep, DataTable, EditError, EditHandler, EditOutcome, InputKind,
    MemoryNotifier, MountPoints, NotificationLevel, TableConfig, TableRow,
};
use serde_json::{Map, Value, json};

type Row = Map<String, Value>;

/// Edit handler answering with a fixed result and counting calls.
struct FixedHandler {
    answer: Result<bool, EditError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FixedHandler {
    fn new(answer: Result<bool, EditError>) -> Arc<Self> {
        Arc::new(Self {
            answer,
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            answer: Ok(true),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EditHandler<Row> for FixedHandler {
    async fn on_edit(
        &self,
        _row: &Row,
        _field: &str,
        _new_value: &CellValue,
        _old_value: &CellValue,
    ) -> Result<bool, EditError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer.clone()
    }
}

fn table_with(handler: Option<Arc<FixedHandler>>, notifier: &MemoryNotifier) -> DataTable<Row> {
    let mounts = MountPoints::new().with("ops");
    let rows = vec![
        json!({"id": 7, "name": "Milling", "quantity": 5, "due": "2024-03-09"})
            .as_object()
            .cloned()
            .unwrap(),
        json!({"id": 8, "name": "Drilling", "quantity": 1, "due": null})
            .as_object()
            .cloned()
            .unwrap(),
    ];
    let mut config = TableConfig::new(vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("quantity", "Quantity").number(),
        ColumnSpec::new("due", "Due").date(),
    ])
    .data(rows)
    .editable(["name", "quantity", "due"])
    .edit_timeout(Duration::from_millis(50))
    .notifier(Arc::new(notifier.clone()));
    if let Some(handler) = handler {
        config = config.on_edit(handler);
    }
    DataTable::new(&mounts, "ops", config).unwrap()
}

fn cell(table: &DataTable<Row>, id: &str, field: &str) -> CellValue {
    table.find_row(id).unwrap().cell(field)
}

#[tokio::test]
async fn test_accepted_edit_is_written() {
    let notifier = MemoryNotifier::new();
    let handler = FixedHandler::new(Ok(true));
    let mut table = table_with(Some(handler.clone()), &notifier);

    table.begin_edit("7", "quantity").unwrap();
    let outcome = table.commit_edit("12").await.unwrap();

    assert_eq!(outcome, EditOutcome::Committed);
    assert_eq!(cell(&table, "7", "quantity"), CellValue::Int(12));
    assert_eq!(handler.calls(), 1);
    assert!(notifier.is_empty());
    assert!(table.editor().is_none());
}

#[tokio::test]
async fn test_rejected_edit_reverts() {
    let notifier = MemoryNotifier::new();
    let mut table = table_with(Some(FixedHandler::new(Ok(false))), &notifier);

    table.begin_edit("7", "name").unwrap();
    let outcome = table.commit_edit("Turning").await.unwrap();

    assert!(matches!(outcome, EditOutcome::Reverted { .. }));
    assert_eq!(cell(&table, "7", "name"), CellValue::from("Milling"));
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn test_failed_edit_reverts() {
    let notifier = MemoryNotifier::new();
    let handler = FixedHandler::new(Err(EditError::handler("HTTP 500")));
    let mut table = table_with(Some(handler), &notifier);

    table.begin_edit("7", "name").unwrap();
    let outcome = table.commit_edit("Turning").await.unwrap();

    assert_eq!(
        outcome,
        EditOutcome::Reverted {
            reason: "HTTP 500".to_string()
        }
    );
    assert_eq!(cell(&table, "7", "name"), CellValue::from("Milling"));
    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].message.contains("HTTP 500"));
}

#[tokio::test]
async fn test_timed_out_edit_reverts() {
    let notifier = MemoryNotifier::new();
    let mut table = table_with(Some(FixedHandler::slow(Duration::from_millis(500))), &notifier);

    table.begin_edit("7", "name").unwrap();
    let outcome = table.commit_edit("Turning").await.unwrap();

    assert!(matches!(outcome, EditOutcome::Reverted { .. }));
    assert_eq!(cell(&table, "7", "name"), CellValue::from("Milling"));
    assert!(!table.is_cell_pending("7", "name"));
}

#[tokio::test]
async fn test_unchanged_number_skips_handler() {
    let notifier = MemoryNotifier::new();
    let handler = FixedHandler::new(Ok(true));
    let mut table = table_with(Some(handler.clone()), &notifier);

    table.begin_edit("7", "quantity").unwrap();
    let outcome = table.commit_edit("5.0").await.unwrap();

    assert_eq!(outcome, EditOutcome::Unchanged);
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn test_unchanged_date_skips_handler() {
    let notifier = MemoryNotifier::new();
    let handler = FixedHandler::new(Ok(true));
    let mut table = table_with(Some(handler.clone()), &notifier);

    let editor = table.begin_edit("7", "due").unwrap();
    assert_eq!(editor.input, InputKind::Date);
    assert_eq!(editor.initial, "2024-03-09");

    let outcome = table.commit_edit("09.03.2024").await.unwrap();
    assert_eq!(outcome, EditOutcome::Unchanged);
    assert_eq!(handler.calls(), 0);
}

#[tokio::test]
async fn test_invalid_number_notifies_and_keeps_value() {
    let notifier = MemoryNotifier::new();
    let handler = FixedHandler::new(Ok(true));
    let mut table = table_with(Some(handler.clone()), &notifier);

    table.begin_edit("7", "quantity").unwrap();
    let err = table.commit_edit("lots").await.unwrap_err();

    assert!(matches!(err, EditError::Invalid { .. }));
    assert_eq!(cell(&table, "7", "quantity"), CellValue::Int(5));
    assert_eq!(handler.calls(), 0);
    assert_eq!(notifier.drain()[0].level, NotificationLevel::Error);
    assert!(table.editor().is_none());
}

#[test]
fn test_locked_cell_rejects_second_commit() {
    let notifier = MemoryNotifier::new();
    let mut table = table_with(None, &notifier);

    table.begin_edit("7", "name").unwrap();
    let pending = match table.begin_commit("Turning").unwrap() {
        CommitStep::Pending(p) => p,
        CommitStep::Unchanged => panic!("expected a pending edit"),
    };
    assert!(table.is_cell_pending("7", "name"));

    table.begin_edit("7", "name").unwrap();
    let err = table.begin_commit("Boring").unwrap_err();
    assert!(matches!(err, EditError::CellLocked { .. }));
    assert!(table.editor().is_none());
    assert!(table.state().editing_cell.is_none());

    // Other cells of the same row stay editable.
    table.begin_edit("7", "quantity").unwrap();
    assert!(matches!(table.begin_commit("6").unwrap(), CommitStep::Pending(_)));

    assert_eq!(table.finish_commit(pending, Ok(true)), EditOutcome::Committed);
    assert_eq!(cell(&table, "7", "name"), CellValue::from("Turning"));
    assert!(!table.is_cell_pending("7", "name"));
}

#[test]
fn test_accepted_edit_of_removed_row_is_stale() {
    let notifier = MemoryNotifier::new();
    let mut table = table_with(None, &notifier);

    table.begin_edit("8", "name").unwrap();
    let CommitStep::Pending(pending) = table.begin_commit("Reaming").unwrap() else {
        panic!("expected a pending edit");
    };
    table.update_data(Vec::new(), 0, 1);

    assert_eq!(table.finish_commit(pending, Ok(true)), EditOutcome::Stale);
}

fn id_less_table(names: &[&str]) -> DataTable<Row> {
    let mounts = MountPoints::new().with("notes");
    let rows = names
        .iter()
        .map(|n| json!({ "name": n }).as_object().cloned().unwrap())
        .collect();
    let config = TableConfig::new(vec![ColumnSpec::new("name", "Name")])
        .data(rows)
        .editable(["name"])
        .no_pagination();
    DataTable::new(&mounts, "notes", config).unwrap()
}

fn names(table: &DataTable<Row>) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|r| r.cell("name").to_string())
        .collect()
}

#[test]
fn test_resort_during_commit_writes_original_row() {
    let mut table = id_less_table(&["b", "a"]);

    table.begin_edit("#0", "name").unwrap();
    let CommitStep::Pending(pending) = table.begin_commit("z").unwrap() else {
        panic!("expected a pending edit");
    };
    table.click_header("name");
    assert_eq!(names(&table), ["a", "b"]);

    assert_eq!(table.finish_commit(pending, Ok(true)), EditOutcome::Committed);
    assert_eq!(names(&table), ["a", "z"]);
}

#[test]
fn test_replaced_id_less_row_is_stale() {
    let mut table = id_less_table(&["b", "a"]);

    table.begin_edit("#1", "name").unwrap();
    let CommitStep::Pending(pending) = table.begin_commit("z").unwrap() else {
        panic!("expected a pending edit");
    };
    let fresh = vec![json!({"name": "c"}).as_object().cloned().unwrap()];
    table.update_data(fresh, 1, 1);

    assert_eq!(table.finish_commit(pending, Ok(true)), EditOutcome::Stale);
    assert_eq!(names(&table), ["c"]);
}

#[test]
fn test_non_editable_cell() {
    let notifier = MemoryNotifier::new();
    let mut table = table_with(None, &notifier);
    assert!(matches!(
        table.begin_edit("7", "id"),
        Err(EditError::NotEditable { .. })
    ));
    assert!(matches!(
        table.begin_edit("99", "name"),
        Err(EditError::RowNotFound(_))
    ));
}

#[tokio::test]
async fn test_edit_without_handler_applies_directly() {
    let notifier = MemoryNotifier::new();
    let mut table = table_with(None, &notifier);

    table.begin_edit("8", "due").unwrap();
    let outcome = table.commit_edit("2024-06-01").await.unwrap();

    assert_eq!(outcome, EditOutcome::Committed);
    assert_eq!(cell(&table, "8", "due"), CellValue::from("2024-06-01"));
}

#[tokio::test]
async fn test_detached_edit_call() {
    let notifier = MemoryNotifier::new();
    let handler = FixedHandler::new(Ok(true));
    let mut table = table_with(Some(handler.clone()), &notifier);

    table.begin_edit("8", "quantity").unwrap();
    let CommitStep::Pending(pending) = table.begin_commit("3").unwrap() else {
        panic!("expected a pending edit");
    };
    let result = table.edit_call(&pending).run().await;
    assert_eq!(table.finish_commit(pending, result), EditOutcome::Committed);
    assert_eq!(handler.calls(), 1);
    assert_eq!(cell(&table, "8", "quantity"), CellValue::Int(3));
}
