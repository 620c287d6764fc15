//! Parts of job orders.

use datatable::{ColumnSpec, ColumnWidth};
use erp_lib::api::OrderBy;
use erp_lib::error::ValidationErrors;
use erp_lib::model::{Record, Resource};
use erp_lib::validation::validate_part;

use crate::filters;
use crate::screen::{DetailSource, DetailSpec, ScreenDefinition};

use super::{format_datetime, or_dash};

#[derive(Debug, Clone, Copy, Default)]
pub struct PartsScreen;

impl ScreenDefinition for PartsScreen {
    fn name(&self) -> &'static str {
        "parts"
    }

    fn title(&self) -> &'static str {
        "Parts"
    }

    fn resource(&self) -> Resource {
        Resource::Parts
    }

    fn columns(&self) -> Vec<ColumnSpec<Record>> {
        vec![
            ColumnSpec::new("key", "Key").width(ColumnWidth::Fixed(10)),
            ColumnSpec::new("name", "Name").editable(),
            ColumnSpec::new("job_no", "Job No"),
            ColumnSpec::new("image_no", "Image No").formatter(or_dash),
            ColumnSpec::new("position_no", "Position").formatter(or_dash),
            ColumnSpec::new("quantity", "Qty").number().editable(),
            ColumnSpec::new("material", "Material").formatter(or_dash),
            ColumnSpec::new("weight_kg", "Weight (kg)").number(),
            ColumnSpec::new("completion_date", "Completed")
                .sortable(false)
                .formatter(format_datetime),
        ]
    }

    fn translate_filter(&self, id: &str, value: &str) -> Option<(String, String)> {
        match id {
            "key-filter" => filters::part_key(value),
            "status-filter" => filters::completion_status(value),
            _ => filters::translate_generic(id, value),
        }
    }

    fn default_ordering(&self) -> Option<OrderBy> {
        Some(OrderBy::asc("key"))
    }

    fn validate(&self, record: &Record) -> Result<(), ValidationErrors> {
        validate_part(record)
    }

    fn detail(&self) -> Option<DetailSpec> {
        Some(DetailSpec {
            title: "Operations",
            source: DetailSource::Related {
                resource: Resource::Operations,
                filter: "part_key",
            },
            row_id_field: "key",
            columns: vec![
                ColumnSpec::new("order", "#").number(),
                ColumnSpec::new("name", "Operation"),
                ColumnSpec::new("machine_name", "Machine").formatter(or_dash),
                ColumnSpec::new("estimated_hours", "Est. Hours").number(),
                ColumnSpec::new("completion_date", "Completed").formatter(format_datetime),
            ],
        })
    }
}
