//! Supplier search criteria

use chrono::{DateTime, Utc};

use super::entity::{SupplierCategory, SupplierStatus};
use crate::domain::common::CompanyId;
use crate::domain::search::{DateRange, Pagination, SearchCriteria, Sort, sort_fields};
use crate::domain::storage::{FilterCondition, SortOrder, SortSpec};

sort_fields!(
    SupplierSortField {
        Name => "name",
        TaxId => "tax_id",
        LastScore => "last_score",
        LastEvaluatedAt => "last_evaluated_at": Timestamp,
        CreatedAt => "created_at": Timestamp,
    }
);

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierSearchCriteria {
    company_id: CompanyId,
    name: Option<String>,
    tax_id: Option<String>,
    category: Option<SupplierCategory>,
    status: Option<SupplierStatus>,
    min_score: Option<f64>,
    max_score: Option<f64>,
    created: DateRange,
    sort: Option<Sort<SupplierSortField>>,
    pagination: Pagination,
}

impl SupplierSearchCriteria {
    pub fn builder(company_id: CompanyId) -> SupplierSearchCriteriaBuilder {
        SupplierSearchCriteriaBuilder::new(company_id)
    }
}

impl SearchCriteria for SupplierSearchCriteria {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    fn filters(&self, _now: DateTime<Utc>) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();

        if let Some(name) = &self.name {
            conditions.push(FilterCondition::contains("name", name.as_str()));
        }
        if let Some(tax_id) = &self.tax_id {
            conditions.push(FilterCondition::contains("tax_id", tax_id.as_str()));
        }
        if let Some(category) = self.category {
            conditions.push(FilterCondition::eq("category", category));
        }
        if let Some(status) = self.status {
            conditions.push(FilterCondition::eq("status", status));
        }
        if let Some(min) = self.min_score {
            conditions.push(FilterCondition::gte("last_score", min));
        }
        if let Some(max) = self.max_score {
            conditions.push(FilterCondition::lte("last_score", max));
        }
        conditions.extend(self.created.conditions("created_at"));

        conditions
    }

    fn sort(&self) -> SortSpec {
        self.sort
            .map(|s| s.to_spec())
            .unwrap_or_else(|| Sort::new(SupplierSortField::Name, SortOrder::Asc).to_spec())
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

#[derive(Debug, Clone)]
pub struct SupplierSearchCriteriaBuilder {
    criteria: SupplierSearchCriteria,
}

impl SupplierSearchCriteriaBuilder {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            criteria: SupplierSearchCriteria {
                company_id,
                name: None,
                tax_id: None,
                category: None,
                status: None,
                min_score: None,
                max_score: None,
                created: DateRange::default(),
                sort: None,
                pagination: Pagination::default(),
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.criteria.name = Some(name.into());
        self
    }

    pub fn with_tax_id(mut self, tax_id: impl Into<String>) -> Self {
        self.criteria.tax_id = Some(tax_id.into());
        self
    }

    pub fn with_category(mut self, category: SupplierCategory) -> Self {
        self.criteria.category = Some(category);
        self
    }

    pub fn with_status(mut self, status: SupplierStatus) -> Self {
        self.criteria.status = Some(status);
        self
    }

    /// Inclusive bounds on the latest evaluation score
    pub fn with_score_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.criteria.min_score = min;
        self.criteria.max_score = max;
        self
    }

    pub fn with_created(mut self, range: DateRange) -> Self {
        self.criteria.created = range;
        self
    }

    pub fn with_pagination(mut self, page: i64, limit: i64) -> Self {
        self.criteria.pagination = Pagination::clamped(page, limit);
        self
    }

    pub fn with_sorting(mut self, field: SupplierSortField, order: SortOrder) -> Self {
        self.criteria.sort = Some(Sort::new(field, order));
        self
    }

    pub fn build(self) -> SupplierSearchCriteria {
        self.criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_score_range_excludes_unevaluated() {
        let query = SupplierSearchCriteria::builder(CompanyId::new("acme").unwrap())
            .with_score_range(Some(60.0), Some(80.0))
            .build()
            .to_query(Utc::now());

        assert!(query.matches(&json!({ "company_id": "acme", "last_score": 60.0 })));
        assert!(query.matches(&json!({ "company_id": "acme", "last_score": 80 })));
        assert!(!query.matches(&json!({ "company_id": "acme", "last_score": 80.5 })));
        assert!(!query.matches(&json!({ "company_id": "acme", "last_score": null })));
    }
}
