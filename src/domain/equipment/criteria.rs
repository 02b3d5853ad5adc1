//! Equipment search criteria

use chrono::{DateTime, Utc};

use super::entity::EquipmentStatus;
use crate::domain::common::CompanyId;
use crate::domain::search::{DateRange, Pagination, SearchCriteria, Sort, sort_fields};
use crate::domain::storage::{FilterCondition, SortOrder, SortSpec};
use crate::domain::user::UserId;

sort_fields!(
    /// Fields equipment can be sorted by
    EquipmentSortField {
        Name => "name",
        Code => "code",
        EquipmentType => "equipment_type",
        NextMaintenanceDate => "next_maintenance_date": Timestamp,
        CreatedAt => "created_at": Timestamp,
    }
);

/// Immutable equipment search snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct EquipmentSearchCriteria {
    company_id: CompanyId,
    name: Option<String>,
    code: Option<String>,
    location: Option<String>,
    equipment_type: Option<String>,
    status: Option<EquipmentStatus>,
    responsible_user_id: Option<UserId>,
    needs_maintenance: bool,
    next_maintenance: DateRange,
    sort: Option<Sort<EquipmentSortField>>,
    pagination: Pagination,
}

impl EquipmentSearchCriteria {
    pub fn builder(company_id: CompanyId) -> EquipmentSearchCriteriaBuilder {
        EquipmentSearchCriteriaBuilder::new(company_id)
    }
}

impl SearchCriteria for EquipmentSearchCriteria {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }

    fn filters(&self, now: DateTime<Utc>) -> Vec<FilterCondition> {
        let mut conditions = Vec::new();

        if let Some(name) = &self.name {
            conditions.push(FilterCondition::contains("name", name.as_str()));
        }
        if let Some(code) = &self.code {
            conditions.push(FilterCondition::contains("code", code.as_str()));
        }
        if let Some(location) = &self.location {
            conditions.push(FilterCondition::contains("location", location.as_str()));
        }
        if let Some(equipment_type) = &self.equipment_type {
            conditions.push(FilterCondition::eq("equipment_type", equipment_type.as_str()));
        }
        if let Some(status) = self.status {
            conditions.push(FilterCondition::eq("status", status));
        }
        if let Some(user_id) = &self.responsible_user_id {
            conditions.push(FilterCondition::eq("responsible_user_id", user_id.as_str()));
        }
        if self.needs_maintenance {
            conditions.push(FilterCondition::lte("next_maintenance_date", now));
            conditions.push(FilterCondition::ne("status", EquipmentStatus::Retired));
        }
        conditions.extend(self.next_maintenance.conditions("next_maintenance_date"));

        conditions
    }

    fn sort(&self) -> SortSpec {
        self.sort
            .map(|s| s.to_spec())
            .unwrap_or_else(|| Sort::new(EquipmentSortField::Name, SortOrder::Asc).to_spec())
    }

    fn pagination(&self) -> Pagination {
        self.pagination
    }
}

/// Fluent builder for [`EquipmentSearchCriteria`]
#[derive(Debug, Clone)]
pub struct EquipmentSearchCriteriaBuilder {
    criteria: EquipmentSearchCriteria,
}

impl EquipmentSearchCriteriaBuilder {
    pub fn new(company_id: CompanyId) -> Self {
        Self {
            criteria: EquipmentSearchCriteria {
                company_id,
                name: None,
                code: None,
                location: None,
                equipment_type: None,
                status: None,
                responsible_user_id: None,
                needs_maintenance: false,
                next_maintenance: DateRange::default(),
                sort: None,
                pagination: Pagination::default(),
            },
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.criteria.name = Some(name.into());
        self
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.criteria.code = Some(code.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.criteria.location = Some(location.into());
        self
    }

    pub fn with_equipment_type(mut self, equipment_type: impl Into<String>) -> Self {
        self.criteria.equipment_type = Some(equipment_type.into());
        self
    }

    pub fn with_status(mut self, status: EquipmentStatus) -> Self {
        self.criteria.status = Some(status);
        self
    }

    pub fn with_responsible_user_id(mut self, user_id: UserId) -> Self {
        self.criteria.responsible_user_id = Some(user_id);
        self
    }

    /// Only equipment whose maintenance is due at query time
    pub fn with_needs_maintenance(mut self, needs_maintenance: bool) -> Self {
        self.criteria.needs_maintenance = needs_maintenance;
        self
    }

    pub fn with_next_maintenance(mut self, range: DateRange) -> Self {
        self.criteria.next_maintenance = range;
        self
    }

    pub fn with_pagination(mut self, page: i64, limit: i64) -> Self {
        self.criteria.pagination = Pagination::clamped(page, limit);
        self
    }

    pub fn with_sorting(mut self, field: EquipmentSortField, order: SortOrder) -> Self {
        self.criteria.sort = Some(Sort::new(field, order));
        self
    }

    pub fn build(self) -> EquipmentSearchCriteria {
        self.criteria
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_needs_maintenance_compares_against_now() {
        let now = Utc::now();
        let criteria = EquipmentSearchCriteria::builder(CompanyId::new("acme").unwrap())
            .with_needs_maintenance(true)
            .build();
        let query = criteria.to_query(now);

        let due = json!({
            "company_id": "acme",
            "status": "OPERATIONAL",
            "next_maintenance_date": now - chrono::Duration::days(1),
        });
        let retired = json!({
            "company_id": "acme",
            "status": "RETIRED",
            "next_maintenance_date": now - chrono::Duration::days(1),
        });
        let later = json!({
            "company_id": "acme",
            "status": "OPERATIONAL",
            "next_maintenance_date": now + chrono::Duration::days(1),
        });
        let unscheduled = json!({ "company_id": "acme", "status": "OPERATIONAL" });

        assert!(query.matches(&due));
        assert!(!query.matches(&retired));
        assert!(!query.matches(&later));
        assert!(!query.matches(&unscheduled));
    }

    #[test]
    fn test_default_sort_is_name() {
        let criteria = EquipmentSearchCriteria::builder(CompanyId::new("acme").unwrap()).build();
        assert_eq!(criteria.sort(), SortSpec::new("name", SortOrder::Asc));
    }
}
