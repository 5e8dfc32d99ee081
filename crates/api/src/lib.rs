//! HTTP API: configuration, routing, and request/response mapping over the
//! surgical inventory catalog.

pub mod app;
pub mod config;
