//! Earthquake exposure monitoring for a reinsurance treaty book.
//!
//! Events and treaties go in, exposure records and summary statistics come
//! out. [`exposure::match_exposures`] and [`summary::summarize`] are pure and
//! recomputed from scratch for every snapshot; loading, filtering and
//! presentation live around them.

pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod exposure;
pub mod feed;
pub mod geo;
pub mod summary;
pub mod treaty;
pub mod types;
