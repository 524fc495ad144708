//! Filter stage.
//!
//! A `Filter` names one or more fields and a predicate. A filter matches
//! when any of its fields satisfies the predicate; a record passes a filter
//! list when every filter matches. A field the record lacks never matches.

use super::value::{parse_date, FieldValue, Record};

/// How a filter compares its value against a record field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact match. Numbers, booleans and timestamps are compared after
    /// parsing the expected value.
    Equals(String),
    /// Case-insensitive substring. On a list, any element may contain it.
    ContainsText(String),
    /// The list field contains this exact element.
    HasMember(String),
    /// Exact match against any of the values.
    OneOf(Vec<String>),
}

/// A filter condition on one or more named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub fields: Vec<String>,
    pub predicate: Predicate,
}

impl Filter {
    pub fn new(field: impl Into<String>, predicate: Predicate) -> Self {
        Self {
            fields: vec![field.into()],
            predicate,
        }
    }

    /// Free-text search: case-insensitive substring over several fields.
    pub fn search(fields: &[&str], needle: impl Into<String>) -> Self {
        Self {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            predicate: Predicate::ContainsText(needle.into().to_lowercase()),
        }
    }

    pub fn one_of(field: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(field, Predicate::OneOf(values))
    }

    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(field, Predicate::Equals(value.into()))
    }

    pub fn contains_text(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(field, Predicate::ContainsText(needle.into().to_lowercase()))
    }

    pub fn has_member(field: impl Into<String>, member: impl Into<String>) -> Self {
        Self::new(field, Predicate::HasMember(member.into()))
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.fields
            .iter()
            .any(|field| self.value_matches(&record.field(field)))
    }

    fn value_matches(&self, value: &FieldValue<'_>) -> bool {
        if value.is_missing() {
            return false;
        }

        match &self.predicate {
            Predicate::Equals(expected) => equals(value, expected),
            Predicate::ContainsText(needle) => contains_text(value, needle),
            Predicate::HasMember(member) => match value {
                FieldValue::List(items) => items.iter().any(|item| item == member),
                _ => false,
            },
            Predicate::OneOf(values) => values.iter().any(|expected| equals(value, expected)),
        }
    }
}

fn equals(value: &FieldValue<'_>, expected: &str) -> bool {
    match value {
        FieldValue::Text(s) => *s == expected,
        FieldValue::Number(n) => expected.parse::<f64>().map(|e| e == *n).unwrap_or(false),
        FieldValue::Time(t) => parse_date(expected).map(|e| e == *t).unwrap_or(false),
        // lists are matched with HasMember
        FieldValue::List(_) | FieldValue::Missing => false,
    }
}

fn contains_text(value: &FieldValue<'_>, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    match value {
        FieldValue::Text(s) => s.to_lowercase().contains(&needle),
        FieldValue::List(items) => items
            .iter()
            .any(|item| item.to_lowercase().contains(&needle)),
        _ => false,
    }
}

/// Keep the records matching every filter, preserving input order.
pub fn apply<R: Record>(records: Vec<R>, filters: &[Filter]) -> Vec<R> {
    if filters.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| filters.iter().all(|f| f.matches(record)))
        .collect()
}
