//! Payment terms.

use datatable::{CellValue, ColumnSpec};
use erp_lib::error::ValidationErrors;
use erp_lib::model::{Record, Resource};
use erp_lib::validation::validate_payment_term;

use crate::screen::ScreenDefinition;

#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentTermsScreen;

/// `30% Advance, 70% Delivery`
fn summarize_lines(_value: &CellValue, row: &Record) -> String {
    let Some(lines) = row.get("default_lines").and_then(|v| v.as_array()) else {
        return "-".to_string();
    };
    lines
        .iter()
        .filter_map(|line| {
            let label = line.get("label")?.as_str()?;
            let percentage = CellValue::from_json(line.get("percentage")?).as_number()?;
            Some(format!("{}% {}", percentage, label))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

impl ScreenDefinition for PaymentTermsScreen {
    fn name(&self) -> &'static str {
        "payment-terms"
    }

    fn title(&self) -> &'static str {
        "Payment Terms"
    }

    fn resource(&self) -> Resource {
        Resource::PaymentTerms
    }

    fn columns(&self) -> Vec<ColumnSpec<Record>> {
        vec![
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("code", "Code"),
            ColumnSpec::new("default_lines", "Lines")
                .sortable(false)
                .formatter(summarize_lines),
            ColumnSpec::new("is_custom", "Custom").boolean(),
            ColumnSpec::new("active", "Active").boolean(),
        ]
    }

    fn validate(&self, record: &Record) -> Result<(), ValidationErrors> {
        validate_payment_term(record)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_summarize_lines() {
        let row = json!({"default_lines": [
            {"label": "Advance", "percentage": 30},
            {"label": "Delivery", "percentage": "70.00"}
        ]});
        let Some(row) = row.as_object() else { unreachable!() };
        assert_eq!(
            summarize_lines(&CellValue::Null, row),
            "30% Advance, 70% Delivery"
        );
        assert_eq!(summarize_lines(&CellValue::Null, &Record::new()), "-");
    }
}
