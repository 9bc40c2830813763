//! Address range index.
//!
//! Loads the street table once and answers house number lookups
//! against it.

mod loader;
mod street;

pub use loader::{build_index, load_index};
pub use street::StreetIndex;
