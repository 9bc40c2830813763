//! Per-address summary of matching districts and neighborhoods.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::AddressRecord;

/// Districts and neighborhoods an address may belong to, sorted and
/// without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodSummary {
    pub district: Vec<i64>,
    pub neighborhood: Vec<String>,
}

impl NeighborhoodSummary {
    pub fn from_matches<'a, I>(matches: I) -> Self
    where
        I: IntoIterator<Item = &'a AddressRecord>,
    {
        let mut districts = BTreeSet::new();
        let mut neighborhoods = BTreeSet::new();

        for record in matches {
            districts.insert(record.district);
            neighborhoods.insert(record.neighborhood.as_str());
        }

        Self {
            district: districts.into_iter().collect(),
            neighborhood: neighborhoods.into_iter().map(String::from).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.district.is_empty() && self.neighborhood.is_empty()
    }
}
