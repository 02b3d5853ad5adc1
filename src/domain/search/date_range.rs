use chrono::{DateTime, Utc};

use crate::domain::DomainError;
use crate::domain::storage::FilterCondition;

/// Inclusive date range; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Build a range, rejecting `from > to`
    pub fn new(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Self, DomainError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(DomainError::validation(
                    "La fecha inicial no puede ser posterior a la fecha final",
                ));
            }
        }

        Ok(Self { from, to })
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.from
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.to
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Conditions constraining `field` to this range
    pub fn conditions(&self, field: &str) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();

        if let Some(from) = self.from {
            conditions.push(FilterCondition::gte(field, from));
        }

        if let Some(to) = self.to {
            conditions.push(FilterCondition::lte(field, to));
        }

        conditions
    }
}
