//! A web service that validates names and greets the ones made up of letters only.

pub mod api;
pub mod app;
pub mod core;
pub mod infra;
