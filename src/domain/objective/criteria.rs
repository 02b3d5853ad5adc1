//! Objective search criteria

use chrono::{DateTime, Utc};

use super::entity::ObjectiveStatus;
use crate::domain::common::CompanyId;
use crate::domain::search::{DateRange, Pagination, SearchCriteria, Sort, sort_fields};
use crate::domain::storage::{FilterCondition, SortOrder, SortSpec};
use crate::domain::user::UserId;

sort_fields!(
    ObjectiveSortField {
        DueDate => "due_date": Timestamp,
        StartDate => "start_date": Timestamp,
        Title => "title",
        CreatedAt => "created_at": Timestamp,
    }
);

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveSearchCriteria {
    company_id: CompanyId,
    title: Option<String>,
    process: Option<String>,
    status: Option<ObjectiveStatus>,
    responsible_user_id: Option<UserId>,
    overdue: bool,
    due_date: DateRange,
    sort: Option<Sort<ObjectiveSortField>>,
    pagination: Pagination,
}

impl ObjectiveSearchCriteria {
    pub fn builder(company_id: CompanyId) -> ObjectiveSearchCriteriaBuilder {
        ObjectiveSearchCriteriaBuilder::new(company_id)
    }
}

impl SearchCriteria for ObjectiveSearchCriteria {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    fn filters(&self, now: DateTime<Utc>) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();

        if let Some(title) = &self.title {
            conditions.push(FilterCondition::contains("title", title.as_str()));
        }
        if let Some(process) = &self.process {
            conditions.push(FilterCondition::contains("process", process.as_str()));
        }
        if let Some(status) = self.status {
            conditions.push(FilterCondition::eq("status", status));
        }
        if let Some(user_id) = &self.responsible_user_id {
            conditions.push(FilterCondition::eq("responsible_user_id", user_id.as_str()));
        }
        if self.overdue {
            conditions.push(FilterCondition::lt("due_date", now));
            conditions.push(FilterCondition::is_in(
                "status",
                ObjectiveStatus::OPEN.iter().copied(),
            ));
        }
        conditions.extend(self.due_date.conditions("due_date"));

        conditions
    }

    fn sort(&self) -> SortSpec {
        self.sort
            .map(|s| s.to_spec())
            .unwrap_or_else(|| Sort::new(ObjectiveSortField::DueDate, SortOrder::Asc).to_spec())
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

#[derive(Debug, Clone)]
pub struct ObjectiveSearchCriteriaBuilder {
    criteria: ObjectiveSearchCriteria,
}

impl ObjectiveSearchCriteriaBuilder {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            criteria: ObjectiveSearchCriteria {
                company_id,
                title: None,
                process: None,
                status: None,
                responsible_user_id: None,
                overdue: false,
                due_date: DateRange::default(),
                sort: None,
                pagination: Pagination::default(),
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.criteria.title = Some(title.into());
        self
    }

    pub fn with_process(mut self, process: impl Into<String>) -> Self {
        self.criteria.process = Some(process.into());
        self
    }

    pub fn with_status(mut self, status: ObjectiveStatus) -> Self {
        self.criteria.status = Some(status);
        self
    }

    pub fn with_responsible_user_id(mut self, user_id: UserId) -> Self {
        self.criteria.responsible_user_id = Some(user_id);
        self
    }

    /// Only open objectives past their due date at query time
    pub fn with_overdue(mut self, overdue: bool) -> Self {
        self.criteria.overdue = overdue;
        self
    }

    pub fn with_due_date(mut self, range: DateRange) -> Self {
        self.criteria.due_date = range;
        self
    }

    pub fn with_pagination(mut self, page: i64, limit: i64) -> Self {
        self.criteria.pagination = Pagination::clamped(page, limit);
        self
    }

    pub fn with_sorting(mut self, field: ObjectiveSortField, order: SortOrder) -> Self {
        self.criteria.sort = Some(Sort::new(field, order));
        self
    }

    pub fn build(self) -> ObjectiveSearchCriteria {
        self.criteria
    }
}
