//! Street index and house number matching.

use hashbrown::HashMap;
use tracing::{debug, info};

use crate::address::parse_street_address;
use crate::models::{AddressRecord, NeighborhoodSummary};

/// Records for a single street, bucketed by street type.
#[derive(Debug, Default)]
struct StreetEntry {
    /// Type buckets in the order each type was first seen
    buckets: Vec<Vec<AddressRecord>>,
    by_type: HashMap<String, usize>,
}

impl StreetEntry {
    fn push(&mut self, street_type: String, record: AddressRecord) {
        let slot = match self.by_type.get(&street_type) {
            Some(&slot) => slot,
            None => {
                self.buckets.push(Vec::new());
                let slot = self.buckets.len() - 1;
                self.by_type.insert(street_type, slot);
                slot
            }
        };
        self.buckets[slot].push(record);
    }

    fn bucket(&self, street_type: &str) -> Option<&[AddressRecord]> {
        self.by_type
            .get(street_type)
            .map(|&slot| self.buckets[slot].as_slice())
    }

    fn all(&self) -> impl Iterator<Item = &AddressRecord> {
        self.buckets.iter().flatten()
    }
}

/// Address ranges grouped by street name, then street type.
///
/// Keys are lowercased on insert. The index has no mutating methods once
/// built, so it can be shared behind an `Arc` by any number of readers.
#[derive(Debug, Default)]
pub struct StreetIndex {
    streets: HashMap<String, StreetEntry>,
    records: usize,
}

impl StreetIndex {
    /// Build an index from `(street name, street type, record)` rows.
    ///
    /// Rows keep their relative order inside each bucket.
    pub fn build<I, N, T>(rows: I) -> Self
    where
        I: IntoIterator<Item = (N, T, AddressRecord)>,
        N: AsRef<str>,
        T: AsRef<str>,
    {
        let mut index = Self::default();
        for (street_name, street_type, record) in rows {
            index.insert(street_name.as_ref(), street_type.as_ref(), record);
        }
        info!(
            "Street index built with {} records across {} streets",
            index.records,
            index.streets.len()
        );
        index
    }

    fn insert(&mut self, street_name: &str, street_type: &str, record: AddressRecord) {
        self.streets
            .entry(street_name.to_lowercase())
            .or_default()
            .push(street_type.to_lowercase(), record);
        self.records += 1;
    }

    /// Find every record covering `house_number` on the given street.
    ///
    /// Name and type are matched case-insensitively. When the street has no
    /// records under `street_type`, every type registered for the street is
    /// searched instead. An unknown street yields an empty result.
    pub fn find_matches(
        &self,
        house_number: i64,
        street_name: &str,
        street_type: &str,
    ) -> Vec<&AddressRecord> {
        let street_name = street_name.to_lowercase();
        let street_type = street_type.to_lowercase();

        let Some(entry) = self.streets.get(street_name.as_str()) else {
            debug!("No street named {:?}", street_name);
            return Vec::new();
        };

        let matches: Vec<&AddressRecord> = match entry.bucket(&street_type) {
            Some(records) if !records.is_empty() => records
                .iter()
                .filter(|r| r.matches(house_number))
                .collect(),
            _ => {
                debug!(
                    "No {:?} bucket for {:?}, scanning all street types",
                    street_type, street_name
                );
                entry.all().filter(|r| r.matches(house_number)).collect()
            }
        };

        debug!(
            "Lookup {} {} {}: {} matches",
            house_number,
            street_name,
            street_type,
            matches.len()
        );

        matches
    }

    /// Parse a free-form address and summarize the neighborhoods it may be
    /// in. Addresses that cannot be parsed produce an empty summary.
    pub fn find_address(&self, address: &str) -> NeighborhoodSummary {
        match parse_street_address(address) {
            Ok(parsed) => NeighborhoodSummary::from_matches(self.find_matches(
                parsed.number,
                &parsed.name,
                &parsed.street_type,
            )),
            Err(e) => {
                debug!("Unparseable address {:?}: {}", address, e);
                NeighborhoodSummary::default()
            }
        }
    }

    /// Get total number of indexed records
    pub fn len(&self) -> usize {
        self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records == 0
    }

    pub fn street_count(&self) -> usize {
        self.streets.len()
    }

    /// Iterate over all indexed street names
    pub fn streets(&self) -> impl Iterator<Item = &str> {
        self.streets.keys().map(String::as_str)
    }
}
