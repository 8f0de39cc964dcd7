//! Video Editing Courses API Library
//!
//! Backend for the courses landing page: serves the static course catalog
//! and stores lead form submissions in a document store.
//!
//! # Modules
//!
//! - `api`: Route table, middleware and OpenAPI document.
//! - `catalog`: Static course catalog.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `db_storage`: Document store abstraction and lead persistence.
//! - `diagnostics`: Store reachability probe.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod diagnostics;
pub mod errors;
pub mod handlers;
pub mod models;
