//! Upstream Status Collector Library
//!
//! This library provides components for polling third-party service-status
//! endpoints, normalizing their bespoke JSON formats into a uniform
//! four-color health indicator, and filtering the results against a
//! user-maintained visibility configuration.

pub mod errors;
pub mod gather;
pub mod indicator;
pub mod render;
pub mod sources;
pub mod transport;
pub mod visibility;

pub use errors::{Result, StatusError};
pub use gather::{gather_report, select_and_gather_all};
pub use indicator::{Color, Indicator};
pub use sources::{ServiceDirectory, StatusSource, default_directory};
pub use transport::HttpTransport;
pub use visibility::{VisibilityConfig, load_config, save_config};
