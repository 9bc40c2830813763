//! Core data models for the street table.

pub mod record;
pub mod summary;

pub use record::{AddressRecord, ParityRule};
pub use summary::NeighborhoodSummary;
