//! Row action buttons.

use std::fmt;
use std::sync::Arc;

use crate::row::TableRow;

type OnClick<R> = Arc<dyn Fn(R) + Send + Sync>;
type Visible<R> = Arc<dyn Fn(&R) -> bool + Send + Sync>;

/// A button rendered in the actions column of every row.
///
/// The row handed to `on_click` is a clone taken at click time. Hosts doing
/// async work with it should re-fetch the entity.
pub struct ActionSpec<R> {
    /// Unique key within a table.
    pub key: String,
    pub label: String,
    pub icon: String,
    pub class: String,
    on_click: OnClick<R>,
    visible: Option<Visible<R>>,
}

impl<R: TableRow> ActionSpec<R> {
    pub fn new<F>(key: impl Into<String>, label: impl Into<String>, on_click: F) -> Self
    where
        F: Fn(R) + Send + Sync + 'static,
    {
        Self {
            key: key.into(),
            label: label.into(),
            icon: String::new(),
            class: "btn-outline-secondary".to_string(),
            on_click: Arc::new(on_click),
            visible: None,
        }
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Only show the button for rows matching the predicate.
    pub fn visible_when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.visible = Some(Arc::new(predicate));
        self
    }

    /// Whether the button is shown for a row.
    pub fn is_visible(&self, row: &R) -> bool {
        self.visible.as_ref().is_none_or(|v| v(row))
    }

    pub(crate) fn invoke(&self, row: R) {
        (self.on_click)(row);
    }
}

impl<R> Clone for ActionSpec<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            icon: self.icon.clone(),
            class: self.class.clone(),
            on_click: Arc::clone(&self.on_click),
            visible: self.visible.clone(),
        }
    }
}

impl<R> fmt::Debug for ActionSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("icon", &self.icon)
            .field("class", &self.class)
            .finish_non_exhaustive()
    }
}
