//! List query parameters.

/// Sort direction for ordering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

/// Specifies the ordering of list results.
///
/// Rendered as the `ordering` parameter: fields joined by commas, descending
/// fields prefixed with `-`.
///
/// # Example
///
/// ```
/// use erp_lib::api::OrderBy;
///
/// let order = OrderBy::desc("created_at").then_asc("key");
/// assert_eq!(order.to_param(), "-created_at,key");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub(crate) fields: Vec<(String, Direction)>,
}

impl OrderBy {
    /// Creates an ascending order on a field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Asc)],
        }
    }

    /// Creates a descending order on a field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![(field.into(), Direction::Desc)],
        }
    }

    /// Creates an order on a field in the given direction.
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            fields: vec![(field.into(), direction)],
        }
    }

    /// Adds a secondary ascending order on a field.
    pub fn then_asc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Asc));
        self
    }

    /// Adds a secondary descending order on a field.
    pub fn then_desc(mut self, field: impl Into<String>) -> Self {
        self.fields.push((field.into(), Direction::Desc));
        self
    }

    /// Returns the ordered fields with their directions.
    pub fn fields(&self) -> &[(String, Direction)] {
        &self.fields
    }

    pub fn to_param(&self) -> String {
        self.fields
            .iter()
            .map(|(field, direction)| match direction {
                Direction::Asc => field.clone(),
                Direction::Desc => format!("-{}", field),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Query parameters of a list request.
///
/// Filters with empty values are dropped. `page`, `page_size` and `ordering`
/// are appended after the filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListQuery {
    filters: Vec<(String, String)>,
    page: Option<usize>,
    page_size: Option<usize>,
    order_by: Option<OrderBy>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter. Empty values are skipped; a repeated name replaces the earlier value.
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_filter(name, value);
        self
    }

    pub fn set_filter(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        self.filters.retain(|(n, _)| *n != name);
        if !value.trim().is_empty() {
            self.filters.push((name, value));
        }
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order_by = Some(order);
        self
    }

    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    pub fn get_filter(&self, name: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_page(&self) -> Option<usize> {
        self.page
    }

    pub fn get_page_size(&self) -> Option<usize> {
        self.page_size
    }

    pub fn get_order_by(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    /// All parameters in request order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = self.filters.clone();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.page_size {
            pairs.push(("page_size".to_string(), size.to_string()));
        }
        if let Some(order) = &self.order_by
            && !order.fields.is_empty()
        {
            pairs.push(("ordering".to_string(), order.to_param()));
        }
        pairs
    }

    /// URL-encoded query string without the leading `?`.
    pub fn to_query_string(&self) -> String {
        self.to_pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}
