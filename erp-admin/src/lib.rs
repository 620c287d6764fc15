//! Host pages of the ERP admin front-end.
//!
//! Each list page is a [`ListScreen`] driven by a [`ScreenDefinition`] from
//! [`screens`]. Screens talk to the backend through
//! [`erp_lib::api::Backend`] and report to the user through a
//! [`datatable::Notifier`].

pub mod config;
pub mod error;
pub mod filters;
pub mod modal;
pub mod notify;
pub mod paths;
pub mod screen;
pub mod screens;

pub use error::ScreenError;
pub use modal::{ModalHost, ModalStack};
pub use notify::TerminalNotifier;
pub use screen::{
    DetailSource, DetailSpec, DetailView, EventReply, ListScreen, LoadOutcome, ScreenDefinition,
    ScreenOptions, TableEvent,
};
