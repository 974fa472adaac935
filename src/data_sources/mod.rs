//! External data sources for country metadata.
//!
//! # Data Sources
//!
//! - [`rest_countries`]: REST Countries v3.1 - names, population, region,
//!   languages and currencies for every country

pub mod rest_countries;

pub use rest_countries::RestCountriesClient;
