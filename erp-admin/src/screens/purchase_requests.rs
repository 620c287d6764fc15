//! Purchase requests of the procurement module.

use datatable::ColumnSpec;
use erp_lib::api::OrderBy;
use erp_lib::model::{ItemAction, Record, Resource};

use crate::screen::{DetailSource, DetailSpec, ScreenDefinition};

use super::{format_datetime, text_field};

#[derive(Debug, Clone, Copy, Default)]
pub struct PurchaseRequestsScreen;

impl ScreenDefinition for PurchaseRequestsScreen {
    fn name(&self) -> &'static str {
        "purchase-requests"
    }

    fn title(&self) -> &'static str {
        "Purchase Requests"
    }

    fn resource(&self) -> Resource {
        Resource::PurchaseRequests
    }

    fn columns(&self) -> Vec<ColumnSpec<Record>> {
        vec![
            ColumnSpec::new("request_number", "Number"),
            ColumnSpec::new("title", "Title"),
            ColumnSpec::new("requestor_username", "Requestor"),
            ColumnSpec::new("priority", "Priority"),
            ColumnSpec::new("status", "Status"),
            ColumnSpec::new("total_amount_eur", "Total (EUR)").number(),
            ColumnSpec::new("created_at", "Created").formatter(format_datetime),
        ]
    }

    fn default_ordering(&self) -> Option<OrderBy> {
        Some(OrderBy::desc("created_at"))
    }

    fn detail(&self) -> Option<DetailSpec> {
        Some(DetailSpec {
            title: "Items",
            source: DetailSource::Embedded("items"),
            row_id_field: "id",
            columns: vec![
                ColumnSpec::new("item.code", "Code"),
                ColumnSpec::new("item.name", "Item"),
                ColumnSpec::new("quantity", "Qty").number(),
                ColumnSpec::new("item.unit", "Unit"),
            ],
        })
    }

    fn action_visible(&self, action: ItemAction, row: &Record) -> bool {
        let status = text_field(row, "status").unwrap_or_default();
        match action {
            ItemAction::Submit => status == "draft",
            ItemAction::Approve | ItemAction::Reject => status == "submitted",
            ItemAction::Complete => status == "approved",
            ItemAction::Cancel => matches!(status, "draft" | "submitted"),
            _ => true,
        }
    }
}
