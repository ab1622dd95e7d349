//! Row conversion helpers shared by the query modules.
//!
//! Timestamps are stored as RFC 3339 text and structured columns as JSON
//! text. Decoding failures surface as `FromSqlConversionFailure` so they flow
//! through rusqlite's row mapping like any other column error.

use std::str::FromStr;

use jiff::Timestamp;
use rusqlite::{types::Type, Row};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

fn conversion_failure(
    idx: usize,
    error: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(error))
}

pub(super) fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(idx)?
        .parse::<Timestamp>()
        .map_err(|e| conversion_failure(idx, e))
}

pub(super) fn json_column<T: DeserializeOwned>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    let text: String = row.get(idx)?;
    serde_json::from_str(&text).map_err(|e| conversion_failure(idx, e))
}

pub(super) fn optional_json_column<T: DeserializeOwned>(
    row: &Row<'_>,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    row.get::<_, Option<String>>(idx)?
        .map(|text| serde_json::from_str(&text).map_err(|e| conversion_failure(idx, e)))
        .transpose()
}

/// Parses a text column through [`FromStr`], e.g. a status enum.
pub(super) fn parsed_column<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let text: String = row.get(idx)?;
    text.parse::<T>().map_err(|message| {
        conversion_failure(
            idx,
            std::io::Error::new(std::io::ErrorKind::InvalidData, message),
        )
    })
}

pub(super) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub(super) fn to_optional_json<T: Serialize>(value: Option<&T>) -> Result<Option<String>> {
    value.map(to_json).transpose()
}
