//! User search criteria

use chrono::{DateTime, Utc};

use super::entity::{UserRole, UserStatus};
use crate::domain::common::CompanyId;
use crate::domain::job_profile::JobProfileId;
use crate::domain::search::{DateRange, Pagination, SearchCriteria, Sort, sort_fields};
use crate::domain::storage::{FilterCondition, SortOrder, SortSpec};

sort_fields!(
    /// Fields users can be sorted by
    UserSortField {
        Name => "name",
        Email => "email",
        Role => "role",
        CreatedAt => "created_at": Timestamp,
        LastLoginAt => "last_login_at": Timestamp,
    }
);

/// Immutable user search snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct UserSearchCriteria {
    company_id: CompanyId,
    name: Option<String>,
    email: Option<String>,
    role: Option<UserRole>,
    status: Option<UserStatus>,
    job_profile_id: Option<JobProfileId>,
    created: DateRange,
    sort: Option<Sort<UserSortField>>,
    pagination: Pagination,
}

impl UserSearchCriteria {
    pub fn builder(company_id: CompanyId) -> UserSearchCriteriaBuilder {
        UserSearchCriteriaBuilder::new(company_id)
    }
}

impl SearchCriteria for UserSearchCriteria {
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
        if let Some(role) = self.role {
            conditions.push(FilterCondition::eq("role", role));
        }
        if let Some(status) = self.status {
            conditions.push(FilterCondition::eq("status", status));
        }
        if let Some(job_profile_id) = &self.job_profile_id {
            conditions.push(FilterCondition::eq("job_profile_id", job_profile_id.as_str()));
        }
        conditions.extend(self.created.conditions("created_at"));

        conditions
    }

    fn sort(&self) -> SortSpec {
        self.sort
            .map(|s| s.to_spec())
            .unwrap_or_else(|| Sort::new(UserSortField::Name, SortOrder::Asc).to_spec())
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

/// Fluent builder for [`UserSearchCriteria`]
#[derive(Debug, Clone)]
pub struct UserSearchCriteriaBuilder {
    criteria: UserSearchCriteria,
}

impl UserSearchCriteriaBuilder {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            criteria: UserSearchCriteria {
                company_id,
                name: None,
                email: None,
                role: None,
                status: None,
                job_profile_id: None,
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

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.criteria.role = Some(role);
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.criteria.status = Some(status);
        self
    }

    pub fn with_job_profile_id(mut self, job_profile_id: JobProfileId) -> Self {
        self.criteria.job_profile_id = Some(job_profile_id);
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

    pub fn with_sorting(mut self, field: UserSortField, order: SortOrder) -> Self {
        self.criteria.sort = Some(Sort::new(field, order));
        self
    }

    pub fn build(self) -> UserSearchCriteria {
        self.criteria
    }
}
