//! Equipment entity and maintenance scheduling

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    EquipmentValidationError, validate_equipment_code, validate_equipment_name,
    validate_equipment_type, validate_frequency, validate_optional_text,
};
use crate::domain::common::validation::normalize_optional;
use crate::domain::common::{CompanyId, define_id, string_enum};
use crate::domain::storage::{StorageEntity, UniqueConstraint};
use crate::domain::traits::TenantScoped;
use crate::domain::user::UserId;

define_id!(
    /// Equipment identifier
    EquipmentId,
    "equipo"
);

string_enum!(
    #[derive(Default)]
    EquipmentStatus, "estado de equipo" {
        #[default]
        Operational => "OPERATIONAL",
        UnderMaintenance => "UNDER_MAINTENANCE",
        OutOfService => "OUT_OF_SERVICE",
        /// Terminal
        Retired => "RETIRED",
    }
);

/// Data required to register a piece of equipment
#[derive(Debug, Clone, Default)]
pub struct NewEquipment {
    pub name: String,
    pub code: String,
    pub equipment_type: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub responsible_user_id: Option<UserId>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub maintenance_frequency_days: Option<u32>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct EquipmentChanges {
    pub name: Option<String>,
    pub code: Option<String>,
    pub equipment_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub location: Option<String>,
    pub responsible_user_id: Option<Option<UserId>>,
    pub purchase_date: Option<DateTime<Utc>>,
    pub maintenance_frequency_days: Option<u32>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
}

/// Measuring or production equipment under maintenance control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    id: EquipmentId,
    company_id: CompanyId,
    name: String,
    code: String,
    equipment_type: String,
    brand: Option<String>,
    model: Option<String>,
    serial_number: Option<String>,
    location: Option<String>,
    responsible_user_id: Option<UserId>,
    purchase_date: Option<DateTime<Utc>>,
    maintenance_frequency_days: Option<u32>,
    last_maintenance_date: Option<DateTime<Utc>>,
    next_maintenance_date: Option<DateTime<Utc>>,
    status: EquipmentStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Equipment {
    /// Register new operational equipment
    ///
    /// Without an explicit next maintenance date, one is scheduled from the
    /// last maintenance and the frequency when both are known.
    pub fn new(company_id: CompanyId, data: NewEquipment) -> Result<Self, EquipmentValidationError> {
        let name = data.name.trim().to_string();
        let code = data.code.trim().to_string();
        let equipment_type = data.equipment_type.trim().to_string();
        let brand = normalize_optional(data.brand);
        let model = normalize_optional(data.model);
        let serial_number = normalize_optional(data.serial_number);
        let location = normalize_optional(data.location);

        validate_equipment_name(&name)?;
        validate_equipment_code(&code)?;
        validate_equipment_type(&equipment_type)?;
        validate_optional_text("marca", brand.as_deref())?;
        validate_optional_text("modelo", model.as_deref())?;
        validate_optional_text("número de serie", serial_number.as_deref())?;
        validate_optional_text("ubicación", location.as_deref())?;
        validate_frequency(data.maintenance_frequency_days)?;

        if let (Some(purchase), Some(last)) = (data.purchase_date, data.last_maintenance_date) {
            if last < purchase {
                return Err(EquipmentValidationError::MaintenanceBeforePurchase);
            }
        }

        let next_maintenance_date = data.next_maintenance_date.or_else(|| {
            schedule_next(data.last_maintenance_date, data.maintenance_frequency_days)
        });

        let now = Utc::now();

        Ok(Self {
            id: EquipmentId::generate(),
            company_id,
            name,
            code,
            equipment_type,
            brand,
            model,
            serial_number,
            location,
            responsible_user_id: data.responsible_user_id,
            purchase_date: data.purchase_date,
            maintenance_frequency_days: data.maintenance_frequency_days,
            last_maintenance_date: data.last_maintenance_date,
            next_maintenance_date,
            status: EquipmentStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &EquipmentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn equipment_type(&self) -> &str {
        &self.equipment_type
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn responsible_user_id(&self) -> Option<&UserId> {
        self.responsible_user_id.as_ref()
    }

    pub fn purchase_date(&self) -> Option<DateTime<Utc>> {
        self.purchase_date
    }

    pub fn maintenance_frequency_days(&self) -> Option<u32> {
        self.maintenance_frequency_days
    }

    pub fn last_maintenance_date(&self) -> Option<DateTime<Utc>> {
        self.last_maintenance_date
    }

    pub fn next_maintenance_date(&self) -> Option<DateTime<Utc>> {
        self.next_maintenance_date
    }

    pub fn status(&self) -> EquipmentStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Maintenance is due as of `now` and the equipment is still in use
    pub fn needs_maintenance(&self, now: DateTime<Utc>) -> bool {
        self.status != EquipmentStatus::Retired
            && self.next_maintenance_date.is_some_and(|next| next <= now)
    }

    /// Apply a partial update, validating every provided field first
    pub fn apply(&mut self, changes: EquipmentChanges) -> Result<(), EquipmentValidationError> {
        let name = changes.name.map(|v| v.trim().to_string());
        let code = changes.code.map(|v| v.trim().to_string());
        let equipment_type = changes.equipment_type.map(|v| v.trim().to_string());

        if let Some(name) = &name {
            validate_equipment_name(name)?;
        }
        if let Some(code) = &code {
            validate_equipment_code(code)?;
        }
        if let Some(equipment_type) = &equipment_type {
            validate_equipment_type(equipment_type)?;
        }
        validate_optional_text("marca", changes.brand.as_deref())?;
        validate_optional_text("modelo", changes.model.as_deref())?;
        validate_optional_text("número de serie", changes.serial_number.as_deref())?;
        validate_optional_text("ubicación", changes.location.as_deref())?;
        validate_frequency(changes.maintenance_frequency_days)?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(code) = code {
            self.code = code;
        }
        if let Some(equipment_type) = equipment_type {
            self.equipment_type = equipment_type;
        }
        if changes.brand.is_some() {
            self.brand = normalize_optional(changes.brand);
        }
        if changes.model.is_some() {
            self.model = normalize_optional(changes.model);
        }
        if changes.serial_number.is_some() {
            self.serial_number = normalize_optional(changes.serial_number);
        }
        if changes.location.is_some() {
            self.location = normalize_optional(changes.location);
        }
        if let Some(responsible) = changes.responsible_user_id {
            self.responsible_user_id = responsible;
        }
        if let Some(purchase_date) = changes.purchase_date {
            self.purchase_date = Some(purchase_date);
        }
        if let Some(days) = changes.maintenance_frequency_days {
            self.maintenance_frequency_days = Some(days);
            if changes.next_maintenance_date.is_none() {
                if let Some(next) = schedule_next(self.last_maintenance_date, Some(days)) {
                    self.next_maintenance_date = Some(next);
                }
            }
        }
        if let Some(next) = changes.next_maintenance_date {
            self.next_maintenance_date = Some(next);
        }

        self.touch();
        Ok(())
    }

    pub fn set_status(&mut self, status: EquipmentStatus) -> Result<(), EquipmentValidationError> {
        if self.status == EquipmentStatus::Retired && status != EquipmentStatus::Retired {
            return Err(EquipmentValidationError::Retired);
        }

        self.status = status;
        self.touch();
        Ok(())
    }

    /// Record a completed maintenance and schedule the next one
    pub fn record_maintenance(
        &mut self,
        performed_at: DateTime<Utc>,
    ) -> Result<(), EquipmentValidationError> {
        if self.status == EquipmentStatus::Retired {
            return Err(EquipmentValidationError::Retired);
        }
        if self.purchase_date.is_some_and(|purchase| performed_at < purchase) {
            return Err(EquipmentValidationError::MaintenanceBeforePurchase);
        }

        self.last_maintenance_date = Some(performed_at);
        self.next_maintenance_date =
            schedule_next(Some(performed_at), self.maintenance_frequency_days);
        self.status = EquipmentStatus::Operational;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn schedule_next(last: Option<DateTime<Utc>>, frequency_days: Option<u32>) -> Option<DateTime<Utc>> {
    Some(last? + Duration::days(i64::from(frequency_days?)))
}

impl TenantScoped for Equipment {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }
}

impl StorageEntity for Equipment {
    type Key = EquipmentId;
    const COLLECTION: &'static str = "equipment";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn unique_constraints() -> Vec<UniqueConstraint> {
        vec![UniqueConstraint::new("company_code", &["company_id", "code"]).case_insensitive()]
    }

    fn indexes() -> Vec<&'static [&'static str]> {
        vec![
            &["company_id", "status"],
            &["company_id", "equipment_type"],
            &["company_id", "next_maintenance_date"],
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 9, 0, 0).unwrap()
    }

    fn new_equipment() -> NewEquipment {
        NewEquipment {
            name: "Balanza analítica".to_string(),
            code: "BAL-01".to_string(),
            equipment_type: "Medición".to_string(),
            maintenance_frequency_days: Some(10),
            ..Default::default()
        }
    }

    fn company() -> CompanyId {
        CompanyId::new("acme").unwrap()
    }

    #[test]
    fn test_new_equipment_defaults() {
        let equipment = Equipment::new(company(), new_equipment()).unwrap();

        assert_eq!(equipment.status(), EquipmentStatus::Operational);
        assert_eq!(equipment.created_at(), equipment.updated_at());
        assert!(equipment.next_maintenance_date().is_none());
    }

    #[test]
    fn test_next_maintenance_is_scheduled_from_last() {
        let mut data = new_equipment();
        data.last_maintenance_date = Some(day(1));

        let equipment = Equipment::new(company(), data).unwrap();
        assert_eq!(equipment.next_maintenance_date(), Some(day(11)));
    }

    #[test]
    fn test_record_maintenance_reschedules_and_reopens() {
        let mut equipment = Equipment::new(company(), new_equipment()).unwrap();
        equipment.set_status(EquipmentStatus::UnderMaintenance).unwrap();

        equipment.record_maintenance(day(5)).unwrap();

        assert_eq!(equipment.last_maintenance_date(), Some(day(5)));
        assert_eq!(equipment.next_maintenance_date(), Some(day(15)));
        assert_eq!(equipment.status(), EquipmentStatus::Operational);
    }

    #[test]
    fn test_needs_maintenance() {
        let mut data = new_equipment();
        data.next_maintenance_date = Some(day(10));
        let mut equipment = Equipment::new(company(), data).unwrap();

        assert!(!equipment.needs_maintenance(day(9)));
        assert!(equipment.needs_maintenance(day(10)));

        equipment.set_status(EquipmentStatus::Retired).unwrap();
        assert!(!equipment.needs_maintenance(day(20)));
    }

    #[test]
    fn test_retired_is_terminal() {
        let mut equipment = Equipment::new(company(), new_equipment()).unwrap();
        equipment.set_status(EquipmentStatus::Retired).unwrap();

        assert_eq!(
            equipment.set_status(EquipmentStatus::Operational),
            Err(EquipmentValidationError::Retired)
        );
        assert!(equipment.record_maintenance(day(1)).is_err());
    }

    #[test]
    fn test_rejects_invalid_frequency() {
        let mut data = new_equipment();
        data.maintenance_frequency_days = Some(0);
        assert!(Equipment::new(company(), data).is_err());
    }
}
