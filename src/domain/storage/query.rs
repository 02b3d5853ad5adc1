//! Store-agnostic document query model
//!
//! Criteria objects translate into a [`DocumentQuery`]: a conjunction of
//! field conditions plus optional sort and skip/limit pagination. Backends
//! either translate the query natively (PostgreSQL) or evaluate it against
//! the JSON form of each document (in-memory).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};

/// Scalar value a document field is compared against
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    String(String),
    Number(f64),
    Bool(bool),
    DateTime(DateTime<Utc>),
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for FilterValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for FilterValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for FilterValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<bool> for FilterValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl FilterValue {
    /// Equality against a document value
    fn equals(&self, value: &Value) -> bool {
        match (self, value) {
            (Self::String(expected), Value::String(actual)) => expected == actual,
            (Self::Number(expected), Value::Number(actual)) => {
                actual.as_f64().is_some_and(|a| a == *expected)
            }
            (Self::Bool(expected), Value::Bool(actual)) => expected == actual,
            (Self::DateTime(expected), Value::String(actual)) => {
                parse_datetime(actual).is_some_and(|a| a == *expected)
            }
            _ => false,
        }
    }

    /// Ordering of a document value relative to this value
    fn compare_to(&self, value: &Value) -> Option<Ordering> {
        match (self, value) {
            (Self::Number(expected), Value::Number(actual)) => {
                actual.as_f64()?.partial_cmp(expected)
            }
            (Self::DateTime(expected), Value::String(actual)) => {
                Some(parse_datetime(actual)?.cmp(expected))
            }
            (Self::String(expected), Value::String(actual)) => Some(actual.as_str().cmp(expected)),
            _ => None,
        }
    }
}

/// Comparison applied to a single document field
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOperator {
    Eq(FilterValue),
    Ne(FilterValue),
    /// Case-insensitive substring match on a string field
    ContainsIgnoreCase(String),
    Gt(FilterValue),
    Gte(FilterValue),
    Lt(FilterValue),
    Lte(FilterValue),
    In(Vec<FilterValue>),
    NotIn(Vec<FilterValue>),
    /// Array field holds an element equal to the value
    ArrayContains(FilterValue),
}

/// A single filter condition on a top-level document field
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    pub field: String,
    pub operator: FilterOperator,
}

impl FilterCondition {
    pub fn new(field: impl Into<String>, operator: FilterOperator) -> Self {
        Self {
            field: field.into(),
            operator,
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Eq(value.into()))
    }

    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Ne(value.into()))
    }

    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(field, FilterOperator::ContainsIgnoreCase(needle.into()))
    }

    pub fn gt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Gt(value.into()))
    }

    pub fn gte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Gte(value.into()))
    }

    pub fn lt(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Lt(value.into()))
    }

    pub fn lte(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::Lte(value.into()))
    }

    pub fn is_in<V: Into<FilterValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(
            field,
            FilterOperator::In(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn not_in<V: Into<FilterValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(
            field,
            FilterOperator::NotIn(values.into_iter().map(Into::into).collect()),
        )
    }

    pub fn array_contains(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOperator::ArrayContains(value.into()))
    }

    /// Evaluate the condition against a JSON document
    ///
    /// A missing or null field only satisfies `Ne` and `NotIn`.
    pub fn matches(&self, document: &Value) -> bool {
        let value = match document.get(&self.field) {
            Some(Value::Null) | None => {
                return matches!(
                    self.operator,
                    FilterOperator::Ne(_) | FilterOperator::NotIn(_)
                );
            }
            Some(value) => value,
        };

        match &self.operator {
            FilterOperator::Eq(expected) => expected.equals(value),
            FilterOperator::Ne(expected) => !expected.equals(value),
            FilterOperator::ContainsIgnoreCase(needle) => value
                .as_str()
                .is_some_and(|s| s.to_lowercase().contains(&needle.to_lowercase())),
            FilterOperator::Gt(bound) => bound.compare_to(value) == Some(Ordering::Greater),
            FilterOperator::Gte(bound) => matches!(
                bound.compare_to(value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOperator::Lt(bound) => bound.compare_to(value) == Some(Ordering::Less),
            FilterOperator::Lte(bound) => matches!(
                bound.compare_to(value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOperator::In(candidates) => candidates.iter().any(|c| c.equals(value)),
            FilterOperator::NotIn(candidates) => !candidates.iter().any(|c| c.equals(value)),
            FilterOperator::ArrayContains(expected) => value
                .as_array()
                .is_some_and(|items| items.iter().any(|item| expected.equals(item))),
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(DomainError::validation(format!(
                "Orden de clasificación inválido: '{}'",
                other
            ))),
        }
    }
}

/// How a sort field's stored values compare
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKind {
    /// Native JSON ordering
    #[default]
    Value,
    /// RFC 3339 strings compared as instants
    Timestamp,
}

/// Sort directive on a top-level document field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub order: SortOrder,
    pub kind: SortKind,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
            kind: SortKind::Value,
        }
    }

    pub fn with_kind(mut self, kind: SortKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Conjunctive document query with optional sort and skip/limit pagination
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentQuery {
    pub conditions: Vec<FilterCondition>,
    pub sort: Option<SortSpec>,
    pub limit: Option<u64>,
    pub offset: u64,
}

impl DocumentQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, condition: FilterCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn filters(mut self, conditions: impl IntoIterator<Item = FilterCondition>) -> Self {
        self.conditions.extend(conditions);
        self
    }

    pub fn sort_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(SortSpec::new(field, order));
        self
    }

    pub fn sort(mut self, spec: SortSpec) -> Self {
        self.sort = Some(spec);
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Whether a JSON document satisfies every condition
    pub fn matches(&self, document: &Value) -> bool {
        self.conditions.iter().all(|c| c.matches(document))
    }

    /// Evaluate the query in process: filter, sort, skip, then limit
    ///
    /// Ties in the sort field are broken by entity key so pages are stable
    /// for a fixed data set.
    pub fn apply<E: StorageEntity>(&self, entities: Vec<E>) -> Result<Vec<E>, DomainError> {
        let mut matched = Vec::new();

        for entity in entities {
            let document = to_document(&entity)?;

            if self.matches(&document) {
                matched.push((document, entity));
            }
        }

        if let Some(sort) = &self.sort {
            matched.sort_by(|(doc_a, a), (doc_b, b)| {
                let ordering = compare_field(doc_a.get(&sort.field), doc_b.get(&sort.field));
                let ordering = match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                };
                ordering.then_with(|| a.key().as_str().cmp(b.key().as_str()))
            });
        }

        let skip = usize::try_from(self.offset).unwrap_or(usize::MAX);
        let take = self
            .limit
            .map(|l| usize::try_from(l).unwrap_or(usize::MAX))
            .unwrap_or(usize::MAX);

        Ok(matched
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|(_, entity)| entity)
            .collect())
    }
}

/// Serialize an entity into the JSON document stored by backends
pub fn to_document<E: Serialize>(entity: &E) -> Result<Value, DomainError> {
    serde_json::to_value(entity)
        .map_err(|e| DomainError::storage(format!("Failed to serialize entity: {}", e)))
}

/// Ordering between two optional document values
///
/// Missing and null values sort after everything else, matching PostgreSQL's
/// default `NULLS LAST` for ascending order.
pub fn compare_field(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.filter(|v| !v.is_null());
    let b = b.filter(|v| !v.is_null());

    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => compare_values(a, b),
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => match (parse_datetime(x), parse_datetime(y)) {
            (Some(dx), Some(dy)) => dx.cmp(&dy),
            _ => x.cmp(y),
        },
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
