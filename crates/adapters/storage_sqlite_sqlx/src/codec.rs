//! Conversions between column values and domain types.
//!
//! Timestamps are stored as fixed-width RFC 3339 text so that they sort
//! lexically, dates as `YYYY-MM-DD`, enums as their snake case code and
//! boundaries as a JSON array of coordinates.

use std::str::FromStr;

use chrono::SecondsFormat;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use munihub_domain::geo::Coordinate;
use munihub_domain::time::{Date, Timestamp, parse_date, parse_timestamp};

use crate::error::StorageError;

fn decode_err<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

pub(crate) fn timestamp(at: &Timestamp) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn date(date: &Date) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn boundary(points: &[Coordinate]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(points)?)
}

/// Read a text column and parse it with [`FromStr`] (ids and enum codes).
pub(crate) fn parsed<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(decode_err)
}

pub(crate) fn parsed_opt<T>(row: &SqliteRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|raw| raw.parse().map_err(decode_err)).transpose()
}

pub(crate) fn timestamp_col(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse_timestamp(&raw).map_err(decode_err)
}

pub(crate) fn timestamp_opt(row: &SqliteRow, column: &str) -> Result<Option<Timestamp>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|raw| parse_timestamp(&raw).map_err(decode_err))
        .transpose()
}

pub(crate) fn date_col(row: &SqliteRow, column: &str) -> Result<Date, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    parse_date(&raw).map_err(decode_err)
}

pub(crate) fn date_opt(row: &SqliteRow, column: &str) -> Result<Option<Date>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.map(|raw| parse_date(&raw).map_err(decode_err))
        .transpose()
}

/// `latitude` / `longitude` column pair; either being NULL means no location.
pub(crate) fn location(row: &SqliteRow) -> Result<Option<Coordinate>, sqlx::Error> {
    let latitude: Option<f64> = row.try_get("latitude")?;
    let longitude: Option<f64> = row.try_get("longitude")?;
    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Coordinate::new(latitude, longitude)
            .map(Some)
            .map_err(decode_err),
        _ => Ok(None),
    }
}

pub(crate) fn boundary_col(row: &SqliteRow) -> Result<Vec<Coordinate>, sqlx::Error> {
    let raw: String = row.try_get("boundary")?;
    serde_json::from_str(&raw).map_err(decode_err)
}

pub(crate) fn count(row: &SqliteRow, column: &str) -> Result<u32, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;
    u32::try_from(raw).map_err(decode_err)
}
