//! Morphological box explorer: importance-biased sampling of the combination
//! space and multi-axis scoring of individual combinations.

pub mod config;
pub mod domain;
pub mod error;
pub mod explorer;
pub mod telemetry;
