//! Street table loading.
//!
//! The table is tab-separated with a header row:
//!
//! ```text
//! StreetName  StreetType  SideCode  HouseNumLo  HouseNumHi  District  Neighborhood
//! main        st          E         100         198         6         Financial District/South Beach
//! ```
//!
//! The input may be gzip-compressed; this is detected from the stream
//! itself, not the file name.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use flate2::read::MultiGzDecoder;
use tracing::info;

use super::StreetIndex;
use crate::error::LoadError;
use crate::models::{AddressRecord, ParityRule};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const MIN_FIELDS: usize = 7;

/// Open a street table file and build the index from it.
pub fn load_index(path: &Path) -> Result<StreetIndex, LoadError> {
    info!("Loading street data from {}", path.display());

    let file = File::open(path).map_err(|source| LoadError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    build_index(file)
}

/// Build the index from a street table stream, plain or gzip-compressed.
///
/// The first row is skipped as a header. Loading stops at the first bad
/// row; no partial index is ever returned.
pub fn build_index<R: Read>(mut reader: R) -> Result<StreetIndex, LoadError> {
    let mut head = Vec::with_capacity(GZIP_MAGIC.len());
    reader
        .by_ref()
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut head)?;

    let compressed = head == GZIP_MAGIC;
    let stream = Cursor::new(head).chain(reader);

    if compressed {
        info!("Detected gzip-compressed street data");
        parse_rows(MultiGzDecoder::new(stream))
    } else {
        parse_rows(stream)
    }
}

fn parse_rows<R: Read>(input: R) -> Result<StreetIndex, LoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(input);

    let mut rows = Vec::new();

    for result in csv_reader.records() {
        let record = result.map_err(csv_error)?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() < MIN_FIELDS {
            return Err(LoadError::MalformedRow {
                line,
                reason: format!(
                    "expected at least {} fields, found {}",
                    MIN_FIELDS,
                    record.len()
                ),
            });
        }

        let address = AddressRecord::new(
            ParityRule::from_code(&record[2]),
            parse_int(&record, 3, "house number low", line)?,
            parse_int(&record, 4, "house number high", line)?,
            parse_int(&record, 5, "district", line)?,
            &record[6],
        );

        rows.push((record[0].to_string(), record[1].to_string(), address));
    }

    Ok(StreetIndex::build(rows))
}

fn parse_int(record: &StringRecord, field: usize, what: &str, line: u64) -> Result<i64, LoadError> {
    let raw = &record[field];
    raw.parse().map_err(|e| LoadError::MalformedRow {
        line,
        reason: format!("{} {:?}: {}", what, raw, e),
    })
}

fn csv_error(err: csv::Error) -> LoadError {
    let line = err.position().map_or(0, |p| p.line());
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => LoadError::Read(e),
        _ => LoadError::MalformedRow { line, reason },
    }
}
