//! Column definitions.

use std::fmt;
use std::sync::Arc;

use crate::row::TableRow;
use crate::value::CellValue;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Layout hint for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnWidth {
    /// Fixed width in characters.
    Fixed(u16),
    /// Share of the remaining width.
    Flex(u16),
    /// Sized to content.
    #[default]
    Auto,
}

/// How a column's values are interpreted for formatting, sorting and editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnKind {
    #[default]
    Text,
    Number,
    Date,
    Boolean,
}

type Formatter<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;
pub(crate) type ValueGetter<R> = Arc<dyn Fn(&R) -> CellValue + Send + Sync>;

/// Column configuration.
///
/// # Examples
///
/// ```ignore
/// let columns = vec![
///     ColumnSpec::new("key", "Key").width(ColumnWidth::Fixed(10)),
///     ColumnSpec::new("quantity", "Quantity").number().editable(),
///     ColumnSpec::new("target_completion_date", "Due").date(),
///     ColumnSpec::new("status", "Status").formatter(|v, _| v.to_string().to_uppercase()),
/// ];
/// ```
pub struct ColumnSpec<R> {
    /// Key into the row. Dotted paths reach nested objects.
    pub field: String,
    /// Header text.
    pub label: String,
    /// Whether clicking the header sorts.
    pub sortable: bool,
    pub width: ColumnWidth,
    pub kind: ColumnKind,
    /// Whether the column takes part in inline editing.
    pub editable: bool,
    pub align: Alignment,
    formatter: Option<Formatter<R>>,
    value_getter: Option<ValueGetter<R>>,
}

impl<R: TableRow> ColumnSpec<R> {
    /// Create a sortable text column.
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            sortable: true,
            width: ColumnWidth::Auto,
            kind: ColumnKind::Text,
            editable: false,
            align: Alignment::Left,
            formatter: None,
            value_getter: None,
        }
    }

    /// Set whether the column is sortable.
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    /// Set the layout hint.
    pub fn width(mut self, width: ColumnWidth) -> Self {
        self.width = width;
        self
    }

    /// Set the value kind.
    pub fn kind(mut self, kind: ColumnKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shorthand for a right-aligned number column.
    pub fn number(mut self) -> Self {
        self.kind = ColumnKind::Number;
        self.align = Alignment::Right;
        self
    }

    /// Shorthand for a date column.
    pub fn date(self) -> Self {
        self.kind(ColumnKind::Date)
    }

    /// Shorthand for a centered boolean column.
    pub fn boolean(mut self) -> Self {
        self.kind = ColumnKind::Boolean;
        self.align = Alignment::Center;
        self
    }

    /// Mark the column editable.
    pub fn editable(mut self) -> Self {
        self.editable = true;
        self
    }

    /// Set the alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    /// Set a display formatter.
    ///
    /// The formatter is called on every render and receives the raw value and
    /// the whole row.
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Returns `true` if a formatter is set.
    pub fn has_formatter(&self) -> bool {
        self.formatter.is_some()
    }

    /// Compute the column's value from the row instead of reading `field`.
    ///
    /// Display, sorting and export all use the computed value.
    pub fn value_getter<F>(mut self, getter: F) -> Self
    where
        F: Fn(&R) -> CellValue + Send + Sync + 'static,
    {
        self.value_getter = Some(Arc::new(getter));
        self
    }

    pub(crate) fn set_value_getter(&mut self, getter: ValueGetter<R>) {
        self.value_getter = Some(getter);
    }

    pub fn has_value_getter(&self) -> bool {
        self.value_getter.is_some()
    }

    /// This column's value for a row.
    pub fn value(&self, row: &R) -> CellValue {
        match &self.value_getter {
            Some(getter) => getter(row),
            None => row.cell(&self.field),
        }
    }

    /// Format this column's value for display.
    pub fn display(&self, row: &R) -> String {
        let value = self.value(row);
        match &self.formatter {
            Some(f) => f(&value, row),
            None => format_default(&value, self.kind),
        }
    }
}

impl<R> Clone for ColumnSpec<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            width: self.width,
            kind: self.kind,
            editable: self.editable,
            align: self.align,
            formatter: self.formatter.clone(),
            value_getter: self.value_getter.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("field", &self.field)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("width", &self.width)
            .field("kind", &self.kind)
            .field("editable", &self.editable)
            .field("align", &self.align)
            .field("formatter", &self.formatter.is_some())
            .field("value_getter", &self.value_getter.is_some())
            .finish()
    }
}

// =============================================================================
// Default formatting
// =============================================================================

/// Format a value the way the table shows it when no formatter is set.
///
/// - `Null` reads `N/A`
/// - dates read `dd.mm.yyyy`
/// - numbers use `.` for thousands and `,` for decimals
/// - booleans read `Yes`/`No`
pub fn format_default(value: &CellValue, kind: ColumnKind) -> String {
    if value.is_null() {
        return "N/A".to_string();
    }
    match kind {
        ColumnKind::Date => match value.as_date() {
            Some(d) => d.format("%d.%m.%Y").to_string(),
            None => value.to_string(),
        },
        ColumnKind::Number => match value {
            CellValue::Int(i) => group_thousands(&i.unsigned_abs().to_string(), *i < 0),
            other => match other.as_number() {
                Some(n) => format_decimal(n),
                None => other.to_string(),
            },
        },
        ColumnKind::Boolean => match value {
            CellValue::Bool(true) => "Yes".to_string(),
            CellValue::Bool(false) => "No".to_string(),
            other => other.to_string(),
        },
        ColumnKind::Text => match value {
            CellValue::Bool(true) => "Yes".to_string(),
            CellValue::Bool(false) => "No".to_string(),
            other => other.to_string(),
        },
    }
}

fn format_decimal(n: f64) -> String {
    let negative = n < 0.0;
    let formatted = format!("{:.2}", n.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let frac = frac_part.trim_end_matches('0');
    let mut out = group_thousands(int_part, negative);
    if !frac.is_empty() {
        out.push(',');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str, negative: bool) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}
