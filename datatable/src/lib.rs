//! Generic data table component.
//!
//! A [`DataTable`] owns column definitions, row data, pagination state
//! (client- or server-side), sort state, inline-edit state and row action
//! buttons. It renders into a [`TableView`] and reports user interactions to
//! the host through the callbacks registered on its [`TableConfig`].
//!
//! # Example
//!
//! ```ignore
//! use datatable::{ColumnSpec, DataTable, MountPoints, TableConfig};
//!
//! let mounts = MountPoints::new().with("parts-table");
//! let config = TableConfig::new(vec![
//!     ColumnSpec::new("key", "Key"),
//!     ColumnSpec::new("name", "Name"),
//!     ColumnSpec::new("quantity", "Qty").number().editable(),
//! ])
//! .row_id_field("key")
//! .pagination(20)
//! .server_side()
//! .on_page_change(|page| log::info!("page {page} requested"));
//!
//! let mut table = DataTable::new(&mounts, "parts-table", config)?;
//! table.update_data(rows, 120, 1);
//! println!("{}", table.render());
//! ```

mod action;
mod column;
mod config;
mod edit;
mod error;
mod events;
mod mount;
mod notify;
mod render;
mod row;
mod sort;
mod state;
mod value;

pub use action::ActionSpec;
pub use column::{Alignment, ColumnKind, ColumnSpec, ColumnWidth, format_default};
pub use config::{EditHandler, ExportFormat, TableConfig};
pub use edit::{CellEditor, CellRef, CommitStep, EditOutcome, InputKind, PendingEdit};
pub use error::{EditError, TableError};
pub use events::EventResult;
pub use mount::MountPoints;
pub use notify::{LogNotifier, MemoryNotifier, Notification, NotificationLevel, Notifier};
pub use render::{
    ActionButton, BodyView, CellState, CellView, ExportSnapshot, HeaderCell, PageSizeView,
    PaginationView, RowView, SortIndicator, TableView, ToolbarView,
};
pub use row::TableRow;
pub use sort::{SortDirection, compare_cells};
pub use state::{DataTable, EditCall, TableState};
pub use value::CellValue;
