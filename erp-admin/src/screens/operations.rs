//! Machining operations.

use datatable::ColumnSpec;
use erp_lib::api::OrderBy;
use erp_lib::model::{ItemAction, Record, Resource};

use crate::screen::ScreenDefinition;

use super::{format_datetime, or_dash};

#[derive(Debug, Clone, Copy, Default)]
pub struct OperationsScreen;

impl ScreenDefinition for OperationsScreen {
    fn name(&self) -> &'static str {
        "operations"
    }

    fn title(&self) -> &'static str {
        "Operations"
    }

    fn resource(&self) -> Resource {
        Resource::Operations
    }

    fn columns(&self) -> Vec<ColumnSpec<Record>> {
        vec![
            ColumnSpec::new("key", "Key"),
            ColumnSpec::new("part_key", "Part"),
            ColumnSpec::new("order", "#").number(),
            ColumnSpec::new("name", "Operation"),
            ColumnSpec::new("machine_name", "Machine").formatter(or_dash),
            ColumnSpec::new("estimated_hours", "Est. Hours").number().editable(),
            ColumnSpec::new("planned_start_ms", "Planned Start").formatter(format_datetime),
            ColumnSpec::new("completion_date", "Completed").formatter(format_datetime),
        ]
    }

    fn default_ordering(&self) -> Option<OrderBy> {
        Some(OrderBy::asc("part_key").then_asc("order"))
    }

    fn action_visible(&self, action: ItemAction, row: &Record) -> bool {
        let completed = row.get("completion_date").is_some_and(|v| !v.is_null());
        match action {
            ItemAction::MarkCompleted => !completed,
            ItemAction::UnmarkCompleted => completed,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_completion_actions_toggle() {
        let screen = OperationsScreen;
        let open = json!({"key": "OP-1", "completion_date": null});
        let done = json!({"key": "OP-2", "completion_date": "2025-01-02T10:00:00Z"});
        let (Some(open), Some(done)) = (open.as_object(), done.as_object()) else {
            unreachable!()
        };

        assert!(screen.action_visible(ItemAction::MarkCompleted, open));
        assert!(!screen.action_visible(ItemAction::UnmarkCompleted, open));
        assert!(!screen.action_visible(ItemAction::MarkCompleted, done));
        assert!(screen.action_visible(ItemAction::UnmarkCompleted, done));
    }
}
