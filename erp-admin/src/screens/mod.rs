//! Screen definitions for each list page.

mod job_orders;
mod operations;
mod overtime;
mod parts;
mod payment_terms;
mod purchase_requests;
mod suppliers;

use std::sync::Arc;

use datatable::CellValue;
use erp_lib::model::Record;

pub use job_orders::JobOrdersScreen;
pub use operations::OperationsScreen;
pub use overtime::OvertimeScreen;
pub use parts::PartsScreen;
pub use payment_terms::PaymentTermsScreen;
pub use purchase_requests::PurchaseRequestsScreen;
pub use suppliers::SuppliersScreen;

use crate::error::ScreenError;
use crate::screen::ScreenDefinition;

/// Every screen, in menu order.
pub fn all() -> Vec<Arc<dyn ScreenDefinition>> {
    vec![
        Arc::new(PartsScreen),
        Arc::new(OperationsScreen),
        Arc::new(JobOrdersScreen),
        Arc::new(OvertimeScreen),
        Arc::new(PurchaseRequestsScreen),
        Arc::new(SuppliersScreen),
        Arc::new(PaymentTermsScreen),
    ]
}

pub fn by_name(name: &str) -> Result<Arc<dyn ScreenDefinition>, ScreenError> {
    all()
        .into_iter()
        .find(|s| s.name() == name)
        .ok_or_else(|| ScreenError::UnknownScreen(name.to_string()))
}

/// `dd.mm.yyyy hh:mm`, or `-` when absent.
pub(crate) fn format_datetime(value: &CellValue, _row: &Record) -> String {
    value
        .as_timestamp()
        .map(|ts| ts.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Text of a field, falling back to `-`.
pub(crate) fn or_dash(value: &CellValue, _row: &Record) -> String {
    if value.is_null() || value.to_string().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

/// Reads a string field of a row.
pub(crate) fn text_field<'a>(row: &'a Record, field: &str) -> Option<&'a str> {
    row.get(field).and_then(|v| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_names_are_unique() {
        let names: Vec<_> = all().iter().map(|s| s.name()).collect();
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(names.len(), deduped.len());
    }

    #[test]
    fn test_by_name() {
        assert_eq!(by_name("parts").unwrap().name(), "parts");
        assert!(matches!(
            by_name("invoices"),
            Err(ScreenError::UnknownScreen(_))
        ));
    }

    #[test]
    fn test_format_datetime() {
        let row = Record::new();
        let value = CellValue::from("2025-06-02T18:30:00Z");
        assert_eq!(format_datetime(&value, &row), "02.06.2025 18:30");
        assert_eq!(format_datetime(&CellValue::Null, &row), "-");
    }
}
