//! Rendered views: body states, pagination window, actions and text output.

use std::sync::{Arc, Mutex};

use datatable::{
    ActionSpec, BodyView, CellState, CellValue, ColumnSpec, ColumnWidth, DataTable, EventResult,
    ExportFormat, MountPoints, SortIndicator, TableConfig, TableError, TableRow,
};
use serde_json::{Map, Value, json};

type Row = Map<String, Value>;

fn make_rows(n: usize) -> Vec<Row> {
    (1..=n)
        .map(|i| {
            json!({
                "id": i,
                "name": format!("part {i}"),
                "quantity": i * 1000,
                "completed": i % 2 == 0,
                "due": null,
            })
            .as_object()
            .cloned()
            .unwrap()
        })
        .collect()
}

fn columns() -> Vec<ColumnSpec<Row>> {
    vec![
        ColumnSpec::new("id", "ID"),
        ColumnSpec::new("name", "Name"),
        ColumnSpec::new("quantity", "Qty").number(),
        ColumnSpec::new("completed", "Done").boolean(),
        ColumnSpec::new("due", "Due").date(),
    ]
}

fn table(config: TableConfig<Row>) -> DataTable<Row> {
    DataTable::new(&MountPoints::new().with("t"), "t", config).unwrap()
}

#[test]
fn test_empty_state() {
    let t = table(TableConfig::new(columns()).empty_state("No parts", "fas fa-box"));
    assert_eq!(
        t.render().body,
        BodyView::Empty {
            message: "No parts".to_string(),
            icon: "fas fa-box".to_string()
        }
    );
}

#[test]
fn test_default_empty_state() {
    let t = table(TableConfig::new(columns()));
    match t.render().body {
        BodyView::Empty { message, icon } => {
            assert_eq!(message, "No records found");
            assert_eq!(icon, "fas fa-inbox");
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn test_loading_and_skeleton() {
    let mut t = table(TableConfig::new(columns()));
    t.set_loading(true);
    assert_eq!(t.render().body, BodyView::Loading);

    let mut t = table(TableConfig::new(columns()).pagination(50).skeleton(true));
    t.set_loading(true);
    assert_eq!(t.render().body, BodyView::Skeleton { rows: 10 });

    let mut t = table(TableConfig::new(columns()).pagination(5).skeleton(true));
    t.set_loading(true);
    assert_eq!(t.render().body, BodyView::Skeleton { rows: 5 });

    t.update_data(make_rows(1), 1, 1);
    assert!(!t.is_loading());
}

#[test]
fn test_default_formatting_in_rows() {
    let t = table(TableConfig::new(columns()).data(make_rows(2)));
    let BodyView::Rows(rows) = t.render().body else {
        panic!("expected rows");
    };
    let texts: Vec<&str> = rows[1].cells.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["2", "part 2", "2.000", "Yes", "N/A"]);
}

#[test]
fn test_pagination_hidden_for_single_page() {
    let t = table(TableConfig::new(columns()).pagination(20).data(make_rows(20)));
    assert!(t.render().pagination.is_none());
}

#[test]
fn test_pagination_window() {
    let mut t = table(TableConfig::new(columns()).pagination(10).server_side());
    t.update_data(make_rows(10), 200, 10);
    let p = t.render().pagination.unwrap();
    assert_eq!(p.pages, vec![8, 9, 10, 11, 12]);
    assert_eq!(p.first_item, 91);
    assert_eq!(p.last_item, 100);
    assert!(p.has_previous && p.has_next);

    t.update_data(make_rows(10), 200, 1);
    let p = t.render().pagination.unwrap();
    assert_eq!(p.pages, vec![1, 2, 3]);
    assert!(!p.has_previous);

    t.update_data(make_rows(5), 195, 20);
    let p = t.render().pagination.unwrap();
    assert_eq!(p.pages, vec![18, 19, 20]);
    assert_eq!(p.last_item, 195);
    assert!(!p.has_next);
}

#[test]
fn test_sort_indicator() {
    let mut t = table(TableConfig::new(columns()).data(make_rows(3)));
    t.click_header("name");
    t.click_header("name");
    let headers = t.render().headers;
    assert_eq!(headers[1].sort, SortIndicator::Desc);
    assert_eq!(headers[0].sort, SortIndicator::None);
}

#[test]
fn test_absent_callbacks_omit_controls() {
    let t = table(TableConfig::new(columns()));
    let view = t.render();
    assert!(!view.toolbar.refresh);
    assert!(view.toolbar.export_formats.is_empty());
    assert!(view.page_size.is_none());

    let t = table(
        TableConfig::new(columns())
            .title("Parts")
            .on_refresh(|| {})
            .on_export(|_| {})
            .on_page_size_change(|_| {}),
    );
    let view = t.render();
    assert_eq!(view.toolbar.title.as_deref(), Some("Parts"));
    assert!(view.toolbar.refresh);
    assert_eq!(view.toolbar.export_formats, vec![ExportFormat::Csv, ExportFormat::Json]);
    assert_eq!(view.page_size.unwrap().options, vec![10, 20, 50, 100]);
}

#[test]
fn test_refresh_and_export_callbacks() {
    let events: Arc<Mutex<Vec<String>>> = Arc::default();
    let refresh_sink = Arc::clone(&events);
    let export_sink = Arc::clone(&events);
    let mut t = table(
        TableConfig::new(columns())
            .export_formats(vec![ExportFormat::Csv])
            .on_refresh(move || refresh_sink.lock().unwrap().push("refresh".to_string()))
            .on_export(move |f| export_sink.lock().unwrap().push(f.as_str().to_string())),
    );

    assert_eq!(t.refresh(), EventResult::Consumed);
    assert_eq!(t.export(ExportFormat::Csv), EventResult::Consumed);
    assert_eq!(t.export(ExportFormat::Json), EventResult::Ignored);
    assert_eq!(*events.lock().unwrap(), vec!["refresh", "csv"]);
}

#[test]
fn test_action_visibility_and_dispatch() {
    let clicked: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&clicked);
    let complete = ActionSpec::new("complete", "Complete", move |row: Row| {
        sink.lock().unwrap().push(row.cell("name").to_string());
    })
    .icon("fas fa-check")
    .class("btn-outline-success")
    .visible_when(|row: &Row| row.cell("completed") == false.into());

    let t = table(TableConfig::new(columns()).data(make_rows(2)).actions(vec![complete]));
    let BodyView::Rows(rows) = t.render().body else {
        panic!("expected rows");
    };
    assert_eq!(rows[0].actions.len(), 1);
    assert_eq!(rows[0].actions[0].class, "btn-outline-success");
    assert!(rows[1].actions.is_empty());

    assert_eq!(t.trigger_action("complete", "1"), EventResult::Consumed);
    assert_eq!(t.trigger_action("complete", "2"), EventResult::Ignored);
    assert_eq!(t.trigger_action("delete", "1"), EventResult::Ignored);
    assert_eq!(*clicked.lock().unwrap(), vec!["part 1"]);
}

#[test]
fn test_editing_cell_state() {
    let mut t = table(TableConfig::new(columns()).data(make_rows(1)).editable(["name"]));
    t.begin_edit("1", "name").unwrap();
    let BodyView::Rows(rows) = t.render().body else {
        panic!("expected rows");
    };
    assert!(matches!(rows[0].cells[1].state, CellState::Editing { .. }));
    assert!(rows[0].cells[1].editable);
    assert!(!rows[0].cells[0].editable);
}

#[test]
fn test_text_rendering_aligns_columns() {
    let t = table(
        TableConfig::new(vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("quantity", "Qty").number(),
        ])
        .title("Parts")
        .data(make_rows(2)),
    );
    let text = t.render().to_string();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Parts");
    assert_eq!(lines[1], "ID | Name   |   Qty");
    assert_eq!(lines[2], "---+--------+------");
    assert_eq!(lines[3], "1  | part 1 | 1.000");
    assert_eq!(lines[4], "2  | part 2 | 2.000");
}

#[test]
fn test_fixed_width_truncates() {
    let t = table(
        TableConfig::new(vec![ColumnSpec::new("name", "Name").width(ColumnWidth::Fixed(4))])
            .data(make_rows(1)),
    );
    let text = t.render().to_string();
    assert!(text.lines().any(|l| l == "par…"));
}

#[test]
fn test_export_snapshot() {
    let t = table(
        TableConfig::new(vec![ColumnSpec::new("id", "ID"), ColumnSpec::new("name", "Name, full")])
            .data(make_rows(2)),
    );
    let snapshot = t.export_snapshot();
    assert_eq!(snapshot.to_csv(), "ID,\"Name, full\"\n1,part 1\n2,part 2\n");
    let json: Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
    assert_eq!(json, json!([{"id": "1", "name": "part 1"}, {"id": "2", "name": "part 2"}]));
}

#[test]
fn test_row_click_dispatch() {
    let clicked: Arc<Mutex<Vec<String>>> = Arc::default();
    let sink = Arc::clone(&clicked);
    let mut t = table(
        TableConfig::new(columns())
            .data(make_rows(2))
            .on_row_click(move |row: Row| sink.lock().unwrap().push(row.cell("name").to_string())),
    );
    let BodyView::Rows(rows) = t.render().body else {
        panic!("expected rows");
    };
    assert!(rows.iter().all(|r| r.clickable));

    assert_eq!(t.click_row("2"), EventResult::Consumed);
    assert_eq!(t.click_row("9"), EventResult::Ignored);
    assert_eq!(*clicked.lock().unwrap(), vec!["part 2"]);
}

#[test]
fn test_rows_without_click_callback() {
    let mut t = table(TableConfig::new(columns()).data(make_rows(1)));
    let BodyView::Rows(rows) = t.render().body else {
        panic!("expected rows");
    };
    assert!(!rows[0].clickable);
    assert_eq!(t.click_row("1"), EventResult::Ignored);
}

#[test]
fn test_value_getter_feeds_display_and_export() {
    let t = table(
        TableConfig::new(vec![
            ColumnSpec::new("id", "ID"),
            ColumnSpec::new("label", "Label"),
        ])
        .data(make_rows(2))
        .value_getter("label", |row: &Row| {
            CellValue::from(format!("{} / {}", row.cell("id"), row.cell("name")))
        }),
    );
    let BodyView::Rows(rows) = t.render().body else {
        panic!("expected rows");
    };
    assert_eq!(rows[0].cells[1].text, "1 / part 1");

    let snapshot = t.export_snapshot();
    assert_eq!(snapshot.to_csv(), "ID,Label\n1,1 / part 1\n2,2 / part 2\n");
}

#[test]
fn test_value_getter_for_unknown_column_fails() {
    let config = TableConfig::new(columns()).value_getter("total", |_: &Row| CellValue::Null);
    let err = DataTable::new(&MountPoints::new().with("t"), "t", config).unwrap_err();
    assert_eq!(err, TableError::UnknownColumn("total".to_string()));
}

