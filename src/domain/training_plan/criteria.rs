//! Training plan search criteria

use chrono::{DateTime, Utc};

use super::entity::{TrainingModality, TrainingStatus};
use crate::domain::common::CompanyId;
use crate::domain::search::{DateRange, Pagination, SearchCriteria, Sort, sort_fields};
use crate::domain::storage::{FilterCondition, SortOrder, SortSpec};
use crate::domain::user::UserId;

sort_fields!(
    TrainingPlanSortField {
        Title => "title",
        StartDate => "start_date": Timestamp,
        EndDate => "end_date": Timestamp,
        DurationHours => "duration_hours",
        Status => "status",
        CreatedAt => "created_at": Timestamp,
    }
);

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingPlanSearchCriteria {
    company_id: CompanyId,
    title: Option<String>,
    modality: Option<TrainingModality>,
    status: Option<TrainingStatus>,
    participant: Option<UserId>,
    year: Option<i32>,
    start: DateRange,
    sort: Option<Sort<TrainingPlanSortField>>,
    pagination: Pagination,
}

impl TrainingPlanSearchCriteria {
    pub fn builder(company_id: CompanyId) -> TrainingPlanSearchCriteriaBuilder {
        TrainingPlanSearchCriteriaBuilder::new(company_id)
    }
}

impl SearchCriteria for TrainingPlanSearchCriteria {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    fn filters(&self, _now: DateTime<Utc>) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();

        if let Some(title) = &self.title {
            conditions.push(FilterCondition::contains("title", title.as_str()));
        }
        if let Some(modality) = self.modality {
            conditions.push(FilterCondition::eq("modality", modality));
        }
        if let Some(status) = self.status {
            conditions.push(FilterCondition::eq("status", status));
        }
        if let Some(participant) = &self.participant {
            conditions.push(FilterCondition::array_contains(
                "participants",
                participant.as_str(),
            ));
        }
        if let Some(year) = self.year {
            conditions.push(FilterCondition::eq("year", year));
        }
        conditions.extend(self.start.conditions("start_date"));

        conditions
    }

    fn sort(&self) -> SortSpec {
        self.sort.map(|s| s.to_spec()).unwrap_or_else(|| {
            Sort::new(TrainingPlanSortField::StartDate, SortOrder::Asc).to_spec()
        })
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

#[derive(Debug, Clone)]
pub struct TrainingPlanSearchCriteriaBuilder {
    criteria: TrainingPlanSearchCriteria,
}

impl TrainingPlanSearchCriteriaBuilder {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            criteria: TrainingPlanSearchCriteria {
                company_id,
                title: None,
                modality: None,
                status: None,
                participant: None,
                year: None,
                start: DateRange::default(),
                sort: None,
                pagination: Pagination::default(),
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.criteria.title = Some(title.into());
        self
    }

    pub fn with_modality(mut self, modality: TrainingModality) -> Self {
        self.criteria.modality = Some(modality);
        self
    }

    pub fn with_status(mut self, status: TrainingStatus) -> Self {
        self.criteria.status = Some(status);
        self
    }

    pub fn with_participant(mut self, user_id: UserId) -> Self {
        self.criteria.participant = Some(user_id);
        self
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.criteria.year = Some(year);
        self
    }

    pub fn with_start(mut self, range: DateRange) -> Self {
        self.criteria.start = range;
        self
    }

    pub fn with_pagination(mut self, page: i64, limit: i64) -> Self {
        self.criteria.pagination = Pagination::clamped(page, limit);
        self
    }

    pub fn with_sorting(mut self, field: TrainingPlanSortField, order: SortOrder) -> Self {
        self.criteria.sort = Some(Sort::new(field, order));
        self
    }

    pub fn build(self) -> TrainingPlanSearchCriteria {
        self.criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_year_and_participant_filters() {
        let user = UserId::generate();
        let query = TrainingPlanSearchCriteria::builder(CompanyId::new("acme").unwrap())
            .with_year(2025)
            .with_participant(user.clone())
            .build()
            .to_query(Utc::now());

        assert!(query.matches(&json!({
            "company_id": "acme",
            "year": 2025,
            "participants": [user.as_str()],
        })));
        assert!(!query.matches(&json!({
            "company_id": "acme",
            "year": 2024,
            "participants": [user.as_str()],
        })));
        assert!(!query.matches(&json!({
            "company_id": "acme",
            "year": 2025,
            "participants": [],
        })));
    }

    #[test]
    fn test_default_sort_is_start_date_ascending() {
        let criteria = TrainingPlanSearchCriteria::builder(CompanyId::new("acme").unwrap()).build();
        let sort = criteria.sort();

        assert_eq!(sort.field, "start_date");
        assert_eq!(sort.order, SortOrder::Asc);
    }
}
