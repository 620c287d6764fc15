//! ERP backend client library
//!
//! An async client for the ERP REST backend: authenticated requests, typed
//! list envelopes, resource and action endpoints, and the client-side
//! validation that runs before anything is sent.

pub mod api;
pub mod auth;
pub mod error;
pub mod model;
pub mod validation;

mod client;

pub use client::*;
