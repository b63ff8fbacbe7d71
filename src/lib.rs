//! ghpeek library
//!
//! Exposes the caching repository, its collaborators and the console front end
//! for use by the binary and by integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod github;
pub mod logging;
pub mod repository;
pub mod search;
pub mod session;
pub mod ui;
