//! Overtime requests.

use chrono::Utc;
use datatable::ColumnSpec;
use erp_lib::api::OrderBy;
use erp_lib::error::ValidationErrors;
use erp_lib::model::{ItemAction, Record, Resource};
use erp_lib::validation::validate_overtime_request;

use crate::screen::{DetailSource, DetailSpec, ScreenDefinition};

use super::{format_datetime, or_dash, text_field};

#[derive(Debug, Clone, Copy, Default)]
pub struct OvertimeScreen;

impl ScreenDefinition for OvertimeScreen {
    fn name(&self) -> &'static str {
        "overtime"
    }

    fn title(&self) -> &'static str {
        "Overtime Requests"
    }

    fn resource(&self) -> Resource {
        Resource::OvertimeRequests
    }

    fn columns(&self) -> Vec<ColumnSpec<Record>> {
        vec![
            ColumnSpec::new("id", "#").number(),
            ColumnSpec::new("requester_username", "Requester"),
            ColumnSpec::new("team_label", "Team").formatter(or_dash),
            ColumnSpec::new("start_at", "Start").formatter(format_datetime),
            ColumnSpec::new("end_at", "End").formatter(format_datetime),
            ColumnSpec::new("duration_hours", "Hours").number(),
            ColumnSpec::new("total_users", "People").number(),
            ColumnSpec::new("status", "Status"),
        ]
    }

    fn default_ordering(&self) -> Option<OrderBy> {
        Some(OrderBy::desc("created_at"))
    }

    fn validate(&self, record: &Record) -> Result<(), ValidationErrors> {
        validate_overtime_request(record, Utc::now())
    }

    fn detail(&self) -> Option<DetailSpec> {
        Some(DetailSpec {
            title: "Participants",
            source: DetailSource::Embedded("entries"),
            row_id_field: "id",
            columns: vec![
                ColumnSpec::new("user_full_name", "Name"),
                ColumnSpec::new("job_no", "Job No"),
                ColumnSpec::new("description", "Description").formatter(or_dash),
            ],
        })
    }

    fn action_visible(&self, action: ItemAction, row: &Record) -> bool {
        let pending = text_field(row, "status") == Some("submitted");
        match action {
            ItemAction::Approve | ItemAction::Reject | ItemAction::Cancel => pending,
            _ => true,
        }
    }
}
