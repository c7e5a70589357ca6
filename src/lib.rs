//! BrewBrowser: a small catalog browser for breweries.
//!
//! A searchable, paginated list with saved items persisted locally, and a
//! detail page per item, all backed by a read-only remote listing API.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod types;
