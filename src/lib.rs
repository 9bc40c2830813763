//! Neighborhood - street address to district/neighborhood lookup
//!
//! This library provides the street index shared by the `find` and
//! `server` binaries.

pub mod address;
pub mod config;
pub mod error;
pub mod index;
pub mod models;

pub use address::{parse_street_address, StreetAddress};
pub use error::{AddressParseError, LoadError};
pub use index::{build_index, load_index, StreetIndex};
pub use models::{AddressRecord, NeighborhoodSummary, ParityRule};
