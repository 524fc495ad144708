//! Sort stage.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use chrono::{DateTime, Utc};

use super::value::{FieldValue, Record};

/// Sort direction. Defaults to descending (most recent first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[serde(alias = "ASC")]
    Asc,
    #[default]
    #[serde(alias = "DESC")]
    Desc,
}

/// Sort key and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

/// Total order over field values.
///
/// Values fall into ordered groups: `Missing`, numbers, points in time
/// (timestamps and date-like text), other text, lists. Within a group
/// numbers compare numerically, times chronologically, text and lists
/// lexicographically.
pub fn compare_values(a: &FieldValue<'_>, b: &FieldValue<'_>) -> Ordering {
    match (SortKey::of(a), SortKey::of(b)) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Time(x), SortKey::Time(y)) => x.cmp(&y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        (SortKey::List(x), SortKey::List(y)) => x.cmp(y),
        (x, y) => x.group().cmp(&y.group()),
    }
}

enum SortKey<'a> {
    Missing,
    Number(f64),
    Time(DateTime<Utc>),
    Text(&'a str),
    List(&'a [String]),
}

impl<'a> SortKey<'a> {
    fn of(value: &FieldValue<'a>) -> Self {
        match *value {
            FieldValue::Missing => SortKey::Missing,
            FieldValue::Number(n) => SortKey::Number(n),
            FieldValue::Time(t) => SortKey::Time(t),
            FieldValue::Text(s) => match value.as_time() {
                Some(t) => SortKey::Time(t),
                None => SortKey::Text(s),
            },
            FieldValue::List(items) => SortKey::List(items),
        }
    }

    fn group(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Number(_) => 1,
            SortKey::Time(_) => 2,
            SortKey::Text(_) => 3,
            SortKey::List(_) => 4,
        }
    }
}

/// Sort records in place. The sort is stable in both directions: records
/// with equal keys keep their relative input order.
pub fn apply<R: Record>(records: &mut [R], sort: &Sort) {
    records.sort_by(|a, b| {
        let ordering = compare_values(&a.field(&sort.field), &b.field(&sort.field));
        match sort.order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
