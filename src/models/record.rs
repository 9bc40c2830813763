//! Address range records loaded from the street table.

use serde::{Deserialize, Serialize};

/// Which side of the street a range covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParityRule {
    /// Even house numbers only (side code `E`)
    EvenOnly,
    /// Odd house numbers only (side code `O`)
    OddOnly,
    /// Every house number on the street, range ignored
    Any,
}

impl ParityRule {
    /// Convert a side code from the street table.
    ///
    /// Anything other than `E` or `O` (including `A`) covers the whole street.
    pub fn from_code(code: &str) -> Self {
        match code {
            "E" => ParityRule::EvenOnly,
            "O" => ParityRule::OddOnly,
            _ => ParityRule::Any,
        }
    }

    /// Get the side code used in the street table
    pub fn code(&self) -> &'static str {
        match self {
            ParityRule::EvenOnly => "E",
            ParityRule::OddOnly => "O",
            ParityRule::Any => "A",
        }
    }
}

/// One row of the street table: a house number range tagged with the
/// district and neighborhood it belongs to.
///
/// The street name and type are not stored here; they are the keys the
/// record is filed under in [`crate::index::StreetIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressRecord {
    pub parity: ParityRule,
    /// Inclusive lower bound
    pub low: i64,
    /// Inclusive upper bound
    pub high: i64,
    pub district: i64,
    pub neighborhood: String,
}

impl AddressRecord {
    pub fn new(
        parity: ParityRule,
        low: i64,
        high: i64,
        district: i64,
        neighborhood: impl Into<String>,
    ) -> Self {
        Self {
            parity,
            low,
            high,
            district,
            neighborhood: neighborhood.into(),
        }
    }

    /// Check whether a house number falls on this record's side of the
    /// street and inside its range.
    ///
    /// A record with `low > high` never matches a bounded rule.
    pub fn matches(&self, house_number: i64) -> bool {
        let odd = house_number.rem_euclid(2) == 1;
        match self.parity {
            ParityRule::EvenOnly if odd => false,
            ParityRule::OddOnly if !odd => false,
            ParityRule::Any => true,
            _ => self.low <= house_number && house_number <= self.high,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_codes() {
        assert_eq!(ParityRule::from_code("E"), ParityRule::EvenOnly);
        assert_eq!(ParityRule::from_code("O"), ParityRule::OddOnly);
        assert_eq!(ParityRule::from_code("A"), ParityRule::Any);
        assert_eq!(ParityRule::from_code("B"), ParityRule::Any);
        assert_eq!(ParityRule::from_code(""), ParityRule::Any);
        // codes are case sensitive
        assert_eq!(ParityRule::from_code("e"), ParityRule::Any);
    }

    #[test]
    fn test_even_rule_rejects_odd_numbers() {
        let record = AddressRecord::new(ParityRule::EvenOnly, 0, 1000, 1, "Mission");
        for n in [1, 3, 99, 501, 999, -7] {
            assert!(!record.matches(n), "{} should not match", n);
        }
        assert!(record.matches(500));
    }

    #[test]
    fn test_odd_rule_rejects_even_numbers() {
        let record = AddressRecord::new(ParityRule::OddOnly, 0, 1000, 1, "Mission");
        for n in [0, 2, 100, 500, 1000, -4] {
            assert!(!record.matches(n), "{} should not match", n);
        }
        assert!(record.matches(501));
    }

    #[test]
    fn test_any_rule_ignores_range() {
        let record = AddressRecord::new(ParityRule::Any, 100, 200, 1, "Mission");
        for n in [-3, 0, 1, 99, 150, 201, 100_000] {
            assert!(record.matches(n), "{} should match", n);
        }
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let even = AddressRecord::new(ParityRule::EvenOnly, 100, 200, 5, "Downtown");
        assert!(even.matches(100));
        assert!(even.matches(200));
        assert!(!even.matches(98));
        assert!(!even.matches(202));

        let odd = AddressRecord::new(ParityRule::OddOnly, 101, 199, 6, "Old Town");
        assert!(odd.matches(101));
        assert!(odd.matches(199));
        assert!(!odd.matches(99));
        assert!(!odd.matches(201));
    }

    #[test]
    fn test_inverted_range_never_matches() {
        let record = AddressRecord::new(ParityRule::EvenOnly, 200, 100, 5, "Downtown");
        for n in (0..300).step_by(2) {
            assert!(!record.matches(n));
        }
    }
}
