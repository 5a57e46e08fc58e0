//! Cursor pagination
//!
//! Lists are always ordered by id descending; a cursor caps the row count
//! and optionally excludes every id at or above the last one seen.

use serde::Deserialize;

use crate::error::app_error::{AppError, AppResult};

/// Derived per request, never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    limit: i64,
    lastseen_id: i64,
}

impl Cursor {
    /// `0` means "unbounded" for `limit` and "no cursor" for `lastseen_id`.
    pub const fn new(limit: i64, lastseen_id: i64) -> Self {
        Self { limit, lastseen_id }
    }

    /// Row cap, if any
    pub fn limit(&self) -> Option<i64> {
        (self.limit > 0).then_some(self.limit)
    }

    /// Exclusive upper bound on ids, if any
    pub fn before(&self) -> Option<i64> {
        (self.lastseen_id > 0).then_some(self.lastseen_id)
    }

    /// Whether a row with this id lies past the cursor
    pub fn admits(&self, id: i64) -> bool {
        self.before().is_none_or(|bound| id < bound)
    }
}

/// Raw `?limit=&lastseenid=` query parameters
///
/// Kept as strings so a bad value yields the endpoint's own message
/// instead of the framework's rejection text.
#[derive(Debug, Default, Deserialize)]
pub struct CursorQuery {
    pub limit: Option<String>,
    pub lastseenid: Option<String>,
}

impl CursorQuery {
    pub fn into_cursor(self, op: &'static str) -> AppResult<Cursor> {
        let limit = parse_unsigned(op, self.limit.as_deref(), "Invalid limit argument")?;
        let lastseen_id =
            parse_unsigned(op, self.lastseenid.as_deref(), "Invalid lastseenid argument")?;
        Ok(Cursor::new(limit, lastseen_id))
    }
}

fn parse_unsigned(op: &'static str, raw: Option<&str>, message: &'static str) -> AppResult<i64> {
    match raw.map(str::trim) {
        None | Some("") => Ok(0),
        Some(value) => value
            .parse::<u64>()
            .ok()
            .and_then(|v| i64::try_from(v).ok())
            .ok_or_else(|| AppError::invalid(op, message)),
    }
}
