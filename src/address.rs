//! Free-form street address parsing.
//!
//! Turns text such as `"123 Main Street #4, San Francisco, CA 94105"` into
//! the `(number, name, type)` triple the street index is keyed on.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::AddressParseError;

static HOUSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)[A-Za-z]*$").expect("house number pattern"));

/// Words that start the unit part of an address. A `#` cuts the line
/// wherever it appears.
const UNIT_DESIGNATORS: &[&str] = &[
    "apt", "apartment", "suite", "ste", "unit", "rm", "room", "fl", "floor",
];

/// A parsed address, lowercased and ready for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetAddress {
    pub number: i64,
    pub name: String,
    /// Abbreviated street type, empty when the address has none
    pub street_type: String,
}

/// Map a street type word to its USPS abbreviation.
pub fn normalize_street_type(word: &str) -> Option<&'static str> {
    let word = word.trim_end_matches('.').to_lowercase();
    let abbr = match word.as_str() {
        "st" | "street" | "str" => "st",
        "ave" | "av" | "avenue" => "ave",
        "blvd" | "boulevard" => "blvd",
        "dr" | "drive" => "dr",
        "ln" | "lane" => "ln",
        "rd" | "road" => "rd",
        "ct" | "court" => "ct",
        "pl" | "place" => "pl",
        "ter" | "terrace" => "ter",
        "way" => "way",
        "hwy" | "highway" => "hwy",
        "cir" | "circle" => "cir",
        "aly" | "alley" => "aly",
        "plz" | "plaza" => "plz",
        "sq" | "square" => "sq",
        "pkwy" | "parkway" => "pkwy",
        "expy" | "expressway" => "expy",
        "stwy" | "stairway" => "stwy",
        "walk" => "walk",
        "row" => "row",
        "loop" => "loop",
        "hl" | "hill" => "hl",
        _ => return None,
    };
    Some(abbr)
}

fn is_unit_designator(token: &str) -> bool {
    let word = token.trim_end_matches('.').to_lowercase();
    UNIT_DESIGNATORS.contains(&word.as_str())
}

/// Parse a raw street address into number, name and type.
///
/// Anything after the first comma (city, state, zip) and any unit
/// designator are dropped. Letters trailing the house number are ignored.
pub fn parse_street_address(address: &str) -> Result<StreetAddress, AddressParseError> {
    let street_line = address
        .split(',')
        .next()
        .and_then(|line| line.split('#').next())
        .unwrap_or_default()
        .trim();
    if street_line.is_empty() {
        return Err(AddressParseError::Empty);
    }

    let mut tokens = street_line.split_whitespace();
    let number_token = tokens.next().ok_or(AddressParseError::Empty)?;
    let number = HOUSE_NUMBER
        .captures(number_token)
        .and_then(|c| c[1].parse::<i64>().ok())
        .ok_or_else(|| AddressParseError::HouseNumber(number_token.to_string()))?;

    let street: Vec<&str> = tokens.take_while(|t| !is_unit_designator(t)).collect();

    // Type is the last recognized word that still leaves a name before it
    let type_pos = street
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .find_map(|(i, t)| normalize_street_type(t).map(|abbr| (i, abbr)));

    let (name_tokens, street_type) = match type_pos {
        Some((i, abbr)) => (&street[..i], abbr),
        None => (&street[..], ""),
    };

    if name_tokens.is_empty() {
        return Err(AddressParseError::MissingStreet(address.to_string()));
    }

    Ok(StreetAddress {
        number,
        name: name_tokens.join(" ").to_lowercase(),
        street_type: street_type.to_string(),
    })
}
