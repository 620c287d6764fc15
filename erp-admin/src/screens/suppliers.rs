//! Suppliers.

use datatable::ColumnSpec;
use erp_lib::error::ValidationErrors;
use erp_lib::model::{Record, Resource};
use erp_lib::validation::validate_supplier;

use crate::filters;
use crate::screen::ScreenDefinition;

use super::or_dash;

#[derive(Debug, Clone, Copy, Default)]
pub struct SuppliersScreen;

impl ScreenDefinition for SuppliersScreen {
    fn name(&self) -> &'static str {
        "suppliers"
    }

    fn title(&self) -> &'static str {
        "Suppliers"
    }

    fn resource(&self) -> Resource {
        Resource::Suppliers
    }

    fn columns(&self) -> Vec<ColumnSpec<Record>> {
        vec![
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("contact_person", "Contact").formatter(or_dash),
            ColumnSpec::new("phone", "Phone").formatter(or_dash),
            ColumnSpec::new("default_currency", "Currency"),
            ColumnSpec::new("default_tax_rate", "Tax %").number(),
            ColumnSpec::new("has_dbs", "DBS").boolean(),
            ColumnSpec::new("dbs_limit", "DBS Limit").number(),
            ColumnSpec::new("is_active", "Active").boolean(),
        ]
    }

    fn translate_filter(&self, id: &str, value: &str) -> Option<(String, String)> {
        match id {
            "status-filter" => filters::active_flag(value),
            _ => filters::translate_generic(id, value),
        }
    }

    fn validate(&self, record: &Record) -> Result<(), ValidationErrors> {
        validate_supplier(record)
    }
}
