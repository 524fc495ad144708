//! Field values exposed by records to the query pipeline.

use chrono::{DateTime, NaiveDate, Utc};

/// Runtime view of one named field on a record.
///
/// Values borrow from the record where they can; `Missing` stands for an
/// absent or null field and compares lower than everything else.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    Missing,
    Text(&'a str),
    Number(f64),
    /// A UTC timestamp (e.g. `publishedAt`).
    Time(DateTime<Utc>),
    /// Ordered strings (e.g. `tags`).
    List(&'a [String]),
}

impl<'a> FieldValue<'a> {
    pub fn opt_text(value: Option<&'a str>) -> Self {
        value.map(FieldValue::Text).unwrap_or(FieldValue::Missing)
    }

    pub fn opt_number(value: Option<f64>) -> Self {
        value.map(FieldValue::Number).unwrap_or(FieldValue::Missing)
    }

    pub fn opt_time(value: Option<DateTime<Utc>>) -> Self {
        value.map(FieldValue::Time).unwrap_or(FieldValue::Missing)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Interpret the value as a point in time, parsing date-like text.
    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::Time(t) => Some(*t),
            FieldValue::Text(s) => parse_date(s),
            _ => None,
        }
    }

}

/// A record whose fields can be filtered and sorted by name.
///
/// Field names are the camelCase names used on the wire. Unknown names
/// return `FieldValue::Missing`.
pub trait Record {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

/// Parse RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
