//! Client search criteria

use chrono::{DateTime, Utc};

use super::entity::{ClientStatus, ClientType};
use crate::domain::common::CompanyId;
use crate::domain::search::{DateRange, Pagination, SearchCriteria, Sort, sort_fields};
use crate::domain::storage::{FilterCondition, SortOrder, SortSpec};

sort_fields!(
    /// Fields clients can be sorted by
    ClientSortField {
        Name => "name",
        Email => "email",
        CreatedAt => "created_at": Timestamp,
        UpdatedAt => "updated_at": Timestamp,
    }
);

/// Immutable client search snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSearchCriteria {
    company_id: CompanyId,
    name: Option<String>,
    email: Option<String>,
    client_type: Option<ClientType>,
    status: Option<ClientStatus>,
    created: DateRange,
    sort: Option<Sort<ClientSortField>>,
    pagination: Pagination,
}

impl ClientSearchCriteria {
    pub fn builder(company_id: CompanyId) -> ClientSearchCriteriaBuilder {
        ClientSearchCriteriaBuilder::new(company_id)
    }
}

impl SearchCriteria for ClientSearchCriteria {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    fn filters(&self, _now: DateTime<Utc>) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();

        if let Some(name) = &self.name {
            conditions.push(FilterCondition::contains("name", name.as_str()));
        }
        if let Some(email) = &self.email {
            conditions.push(FilterCondition::contains("email", email.as_str()));
        }
        if let Some(client_type) = self.client_type {
            conditions.push(FilterCondition::eq("client_type", client_type));
        }
        if let Some(status) = self.status {
            conditions.push(FilterCondition::eq("status", status));
        }
        conditions.extend(self.created.conditions("created_at"));

        conditions
    }

    fn sort(&self) -> SortSpec {
        self.sort
            .map(|s| s.to_spec())
            .unwrap_or_else(|| Sort::new(ClientSortField::CreatedAt, SortOrder::Desc).to_spec())
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

/// Fluent builder for [`ClientSearchCriteria`]
#[derive(Debug, Clone)]
pub struct ClientSearchCriteriaBuilder {
    criteria: ClientSearchCriteria,
}

impl ClientSearchCriteriaBuilder {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            criteria: ClientSearchCriteria {
                company_id,
                name: None,
                email: None,
                client_type: None,
                status: None,
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

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.criteria.email = Some(email.into());
        self
    }

    pub fn with_client_type(mut self, client_type: ClientType) -> Self {
        self.criteria.client_type = Some(client_type);
        self
    }

    pub fn with_status(mut self, status: ClientStatus) -> Self {
        self.criteria.status = Some(status);
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

    pub fn with_sorting(mut self, field: ClientSortField, order: SortOrder) -> Self {
        self.criteria.sort = Some(Sort::new(field, order));
        self
    }

    pub fn build(self) -> ClientSearchCriteria {
        self.criteria
    }
}
