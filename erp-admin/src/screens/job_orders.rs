//! Job orders of the project tracking page.

use datatable::{ColumnSpec, ColumnWidth};
use erp_lib::api::OrderBy;
use erp_lib::model::{ItemAction, Record, Resource};

use crate::filters;
use crate::screen::ScreenDefinition;

use super::{or_dash, text_field};

#[derive(Debug, Clone, Copy, Default)]
pub struct JobOrdersScreen;

impl ScreenDefinition for JobOrdersScreen {
    fn name(&self) -> &'static str {
        "job-orders"
    }

    fn title(&self) -> &'static str {
        "Job Orders"
    }

    fn resource(&self) -> Resource {
        Resource::JobOrders
    }

    fn columns(&self) -> Vec<ColumnSpec<Record>> {
        vec![
            ColumnSpec::new("job_no", "Job No").width(ColumnWidth::Fixed(12)),
            ColumnSpec::new("title", "Title"),
            ColumnSpec::new("customer_name", "Customer").formatter(or_dash),
            ColumnSpec::new("status_display", "Status"),
            ColumnSpec::new("priority_display", "Priority"),
            ColumnSpec::new("target_completion_date", "Target").date(),
            ColumnSpec::new("completion_percentage", "Progress")
                .number()
                .formatter(|value, _| match value.as_number() {
                    Some(p) => format!("{:.0}%", p),
                    None => "-".to_string(),
                }),
            ColumnSpec::new("children_count", "Children").number(),
        ]
    }

    fn translate_filter(&self, id: &str, value: &str) -> Option<(String, String)> {
        match id {
            "has-operations-filter" => {
                filters::translate_generic(id, value).map(|(_, v)| ("has_operations".to_string(), v))
            }
            _ => filters::translate_generic(id, value),
        }
    }

    fn default_ordering(&self) -> Option<OrderBy> {
        Some(OrderBy::desc("created_at"))
    }

    fn action_visible(&self, action: ItemAction, row: &Record) -> bool {
        let status = text_field(row, "status").unwrap_or_default();
        match action {
            ItemAction::Start => status == "draft",
            ItemAction::Hold => status == "active",
            ItemAction::Resume => status == "on_hold",
            ItemAction::Complete => status == "active",
            ItemAction::Cancel => !matches!(status, "completed" | "cancelled"),
            _ => true,
        }
    }

    fn deletable(&self) -> bool {
        false
    }
}
