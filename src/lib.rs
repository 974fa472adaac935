//! Country Stats - country metadata from REST Countries, summarised into tables.
//!
//! # Overview
//!
//! Each request fetches a fresh country list (all countries, or those matching a
//! name), derives a handful of reports from it and renders them into the panels
//! of a small web page. Nothing is cached or persisted between requests.
//!
//! # Modules
//!
//! - [`model`]: Wire types, country records, tallies and summary statistics
//! - [`data_sources`]: REST Countries client
//! - [`aggregation`]: Pure report computations over a country list
//! - [`report`]: Rendering sink abstraction and HTML fragments
//! - [`page`]: The browser page
//! - [`api`]: HTTP API handlers
//! - [`config`]: Environment configuration
//! - [`error`]: Fetch error taxonomy

pub mod aggregation;
pub mod api;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod model;
pub mod page;
pub mod report;
