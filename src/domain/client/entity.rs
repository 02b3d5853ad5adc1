//! Client entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{
    ClientValidationError, MAX_FIELD_LENGTH, MAX_NOTES_LENGTH, validate_client_email,
    validate_client_name, validate_optional_field,
};
use crate::domain::common::validation::{normalize_email, normalize_optional};
use crate::domain::common::{CompanyId, define_id, string_enum};
use crate::domain::storage::{StorageEntity, UniqueConstraint};
use crate::domain::traits::TenantScoped;

define_id!(
    /// Client identifier
    ClientId,
    "cliente"
);

string_enum!(
    /// Whether the client is a person or an organization
    ClientType, "tipo de cliente" {
        Individual => "INDIVIDUAL",
        Company => "COMPANY",
    }
);

string_enum!(
    #[derive(Default)]
    ClientStatus, "estado de cliente" {
        #[default]
        Active => "ACTIVE",
        Inactive => "INACTIVE",
    }
);

/// Data required to register a client
#[derive(Debug, Clone)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub client_type: ClientType,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default)]
pub struct ClientChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub client_type: Option<ClientType>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub tax_id: Option<String>,
    pub contact_person: Option<String>,
    pub notes: Option<String>,
}

/// A customer of the company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    company_id: CompanyId,
    name: String,
    /// Stored lowercased
    email: String,
    client_type: ClientType,
    phone: Option<String>,
    address: Option<String>,
    tax_id: Option<String>,
    contact_person: Option<String>,
    notes: Option<String>,
    status: ClientStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Client {
    /// Create a new active client
    pub fn new(company_id: CompanyId, data: NewClient) -> Result<Self, ClientValidationError> {
        let name = data.name.trim().to_string();
        let email = normalize_email(&data.email);
        let phone = normalize_optional(data.phone);
        let address = normalize_optional(data.address);
        let tax_id = normalize_optional(data.tax_id);
        let contact_person = normalize_optional(data.contact_person);
        let notes = normalize_optional(data.notes);

        validate_client_name(&name)?;
        validate_client_email(&email)?;
        validate_optional_field("teléfono", phone.as_deref(), MAX_FIELD_LENGTH)?;
        validate_optional_field("dirección", address.as_deref(), MAX_FIELD_LENGTH)?;
        validate_optional_field("NIF", tax_id.as_deref(), MAX_FIELD_LENGTH)?;
        validate_optional_field("persona de contacto", contact_person.as_deref(), MAX_FIELD_LENGTH)?;
        validate_optional_field("notas", notes.as_deref(), MAX_NOTES_LENGTH)?;

        let now = Utc::now();

        Ok(Self {
            id: ClientId::generate(),
            company_id,
            name,
            email,
            client_type: data.client_type,
            phone,
            address,
            tax_id,
            contact_person,
            notes,
            status: ClientStatus::default(),
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &ClientId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn client_type(&self) -> ClientType {
        self.client_type
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn tax_id(&self) -> Option<&str> {
        self.tax_id.as_deref()
    }

    pub fn contact_person(&self) -> Option<&str> {
        self.contact_person.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn status(&self) -> ClientStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == ClientStatus::Active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Apply a partial update, validating every provided field first
    pub fn apply(&mut self, changes: ClientChanges) -> Result<(), ClientValidationError> {
        let name = changes.name.map(|n| n.trim().to_string());
        let email = changes.email.as_deref().map(normalize_email);

        if let Some(name) = &name {
            validate_client_name(name)?;
        }
        if let Some(email) = &email {
            validate_client_email(email)?;
        }
        validate_optional_field("teléfono", changes.phone.as_deref(), MAX_FIELD_LENGTH)?;
        validate_optional_field("dirección", changes.address.as_deref(), MAX_FIELD_LENGTH)?;
        validate_optional_field("NIF", changes.tax_id.as_deref(), MAX_FIELD_LENGTH)?;
        validate_optional_field(
            "persona de contacto",
            changes.contact_person.as_deref(),
            MAX_FIELD_LENGTH,
        )?;
        validate_optional_field("notas", changes.notes.as_deref(), MAX_NOTES_LENGTH)?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(client_type) = changes.client_type {
            self.client_type = client_type;
        }
        if changes.phone.is_some() {
            self.phone = normalize_optional(changes.phone);
        }
        if changes.address.is_some() {
            self.address = normalize_optional(changes.address);
        }
        if changes.tax_id.is_some() {
            self.tax_id = normalize_optional(changes.tax_id);
        }
        if changes.contact_person.is_some() {
            self.contact_person = normalize_optional(changes.contact_person);
        }
        if changes.notes.is_some() {
            self.notes = normalize_optional(changes.notes);
        }

        self.touch();
        Ok(())
    }

    pub fn set_status(&mut self, status: ClientStatus) {
        self.status = status;
        self.touch();
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        self.set_status(ClientStatus::Inactive);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl TenantScoped for Client {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }
}

impl StorageEntity for Client {
    type Key = ClientId;
    const COLLECTION: &'static str = "clients";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn unique_constraints() -> Vec<UniqueConstraint> {
        vec![UniqueConstraint::new("company_email", &["company_id", "email"]).case_insensitive()]
    }

    fn indexes() -> Vec<&'static [&'static str]> {
        vec![&["company_id", "status"], &["company_id", "client_type"]]
    }
}
