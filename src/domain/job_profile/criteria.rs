//! Job profile search criteria

use chrono::{DateTime, Utc};

use super::entity::{JobProfileId, JobProfileStatus};
use crate::domain::common::CompanyId;
use crate::domain::search::{DateRange, Pagination, SearchCriteria, Sort, sort_fields};
use crate::domain::storage::{FilterCondition, SortOrder, SortSpec};

sort_fields!(
    JobProfileSortField {
        Title => "title",
        Department => "department",
        CreatedAt => "created_at": Timestamp,
    }
);

#[derive(Debug, Clone, PartialEq)]
pub struct JobProfileSearchCriteria {
    company_id: CompanyId,
    title: Option<String>,
    department: Option<String>,
    status: Option<JobProfileStatus>,
    reports_to: Option<JobProfileId>,
    created: DateRange,
    sort: Option<Sort<JobProfileSortField>>,
    pagination: Pagination,
}

impl JobProfileSearchCriteria {
    pub fn builder(company_id: CompanyId) -> JobProfileSearchCriteriaBuilder {
        JobProfileSearchCriteriaBuilder::new(company_id)
    }
}

impl SearchCriteria for JobProfileSearchCriteria {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    fn filters(&self, _now: DateTime<Utc>) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();

        if let Some(title) = &self.title {
            conditions.push(FilterCondition::contains("title", title.as_str()));
        }
        if let Some(department) = &self.department {
            conditions.push(FilterCondition::contains("department", department.as_str()));
        }
        if let Some(status) = self.status {
            conditions.push(FilterCondition::eq("status", status));
        }
        if let Some(reports_to) = &self.reports_to {
            conditions.push(FilterCondition::eq("reports_to", reports_to.as_str()));
        }
        conditions.extend(self.created.conditions("created_at"));

        conditions
    }

    fn sort(&self) -> SortSpec {
        self.sort
            .map(|s| s.to_spec())
            .unwrap_or_else(|| Sort::new(JobProfileSortField::Title, SortOrder::Asc).to_spec())
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

#[derive(Debug, Clone)]
pub struct JobProfileSearchCriteriaBuilder {
    criteria: JobProfileSearchCriteria,
}

impl JobProfileSearchCriteriaBuilder {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            criteria: JobProfileSearchCriteria {
                company_id,
                title: None,
                department: None,
                status: None,
                reports_to: None,
                created: DateRange::default(),
                sort: None,
                pagination: Pagination::default(),
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.criteria.title = Some(title.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.criteria.department = Some(department.into());
        self
    }

    pub fn with_status(mut self, status: JobProfileStatus) -> Self {
        self.criteria.status = Some(status);
        self
    }

    pub fn with_reports_to(mut self, reports_to: JobProfileId) -> Self {
        self.criteria.reports_to = Some(reports_to);
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

    pub fn with_sorting(mut self, field: JobProfileSortField, order: SortOrder) -> Self {
        self.criteria.sort = Some(Sort::new(field, order));
        self
    }

    pub fn build(self) -> JobProfileSearchCriteria {
        self.criteria
    }
}
