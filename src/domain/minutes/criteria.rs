//! Meeting minutes search criteria

use chrono::{DateTime, Utc};

use super::entity::{MeetingType, MinutesStatus};
use crate::domain::common::CompanyId;
use crate::domain::search::{DateRange, Pagination, SearchCriteria, Sort, sort_fields};
use crate::domain::storage::{FilterCondition, SortOrder, SortSpec};

sort_fields!(
    MinutesSortField {
        MeetingDate => "meeting_date": Timestamp,
        Title => "title",
        CreatedAt => "created_at": Timestamp,
    }
);

#[derive(Debug, Clone, PartialEq)]
pub struct MinutesSearchCriteria {
    company_id: CompanyId,
    title: Option<String>,
    meeting_type: Option<MeetingType>,
    status: Option<MinutesStatus>,
    attendee: Option<String>,
    meeting_date: DateRange,
    sort: Option<Sort<MinutesSortField>>,
    pagination: Pagination,
}

impl MinutesSearchCriteria {
    pub fn builder(company_id: CompanyId) -> MinutesSearchCriteriaBuilder {
        MinutesSearchCriteriaBuilder::new(company_id)
    }
}

impl SearchCriteria for MinutesSearchCriteria {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    fn filters(&self, _now: DateTime<Utc>) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();

        if let Some(title) = &self.title {
            conditions.push(FilterCondition::contains("title", title.as_str()));
        }
        if let Some(meeting_type) = self.meeting_type {
            conditions.push(FilterCondition::eq("meeting_type", meeting_type));
        }
        if let Some(status) = self.status {
            conditions.push(FilterCondition::eq("status", status));
        }
        if let Some(attendee) = &self.attendee {
            conditions.push(FilterCondition::array_contains("attendees", attendee.as_str()));
        }
        conditions.extend(self.meeting_date.conditions("meeting_date"));

        conditions
    }

    fn sort(&self) -> SortSpec {
        self.sort.map(|s| s.to_spec()).unwrap_or_else(|| {
            Sort::new(MinutesSortField::MeetingDate, SortOrder::Desc).to_spec()
        })
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

#[derive(Debug, Clone)]
pub struct MinutesSearchCriteriaBuilder {
    criteria: MinutesSearchCriteria,
}

impl MinutesSearchCriteriaBuilder {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            criteria: MinutesSearchCriteria {
                company_id,
                title: None,
                meeting_type: None,
                status: None,
                attendee: None,
                meeting_date: DateRange::default(),
                sort: None,
                pagination: Pagination::default(),
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.criteria.title = Some(title.into());
        self
    }

    pub fn with_meeting_type(mut self, meeting_type: MeetingType) -> Self {
        self.criteria.meeting_type = Some(meeting_type);
        self
    }

    pub fn with_status(mut self, status: MinutesStatus) -> Self {
        self.criteria.status = Some(status);
        self
    }

    /// Minutes listing this exact attendee
    pub fn with_attendee(mut self, attendee: impl Into<String>) -> Self {
        self.criteria.attendee = Some(attendee.into());
        self
    }

    pub fn with_meeting_date(mut self, range: DateRange) -> Self {
        self.criteria.meeting_date = range;
        self
    }

    pub fn with_pagination(mut self, page: i64, limit: i64) -> Self {
        self.criteria.pagination = Pagination::clamped(page, limit);
        self
    }

    pub fn with_sorting(mut self, field: MinutesSortField, order: SortOrder) -> Self {
        self.criteria.sort = Some(Sort::new(field, order));
        self
    }

    pub fn build(self) -> MinutesSearchCriteria {
        self.criteria
    }
}
