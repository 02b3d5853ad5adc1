//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{UserValidationError, validate_user_email, validate_user_name};
use crate::domain::common::validation::normalize_email;
use crate::domain::common::{CompanyId, define_id, string_enum};
use crate::domain::job_profile::JobProfileId;
use crate::domain::storage::{StorageEntity, UniqueConstraint};
use crate::domain::traits::TenantScoped;

define_id!(
    /// User identifier
    UserId,
    "usuario"
);

string_enum!(
    /// Role of a user within their company
    UserRole, "rol" {
        Admin => "ADMIN",
        Manager => "MANAGER",
        Auditor => "AUDITOR",
        Employee => "EMPLOYEE",
    }
);

impl UserRole {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

string_enum!(
    /// Status of a user account
    #[derive(Default)]
    UserStatus, "estado de usuario" {
        /// User is active and can log in
        #[default]
        Active => "ACTIVE",
        /// Soft-deleted account
        Inactive => "INACTIVE",
        /// User is temporarily suspended
        Suspended => "SUSPENDED",
    }
);

impl UserStatus {
    /// Check if the user can log in
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Data required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub job_profile_id: Option<JobProfileId>,
    pub must_change_password: bool,
}

/// Partial update; `job_profile_id: Some(None)` clears the assignment
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub job_profile_id: Option<Option<JobProfileId>>,
}

/// User account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    company_id: CompanyId,
    name: String,
    /// Stored lowercased
    email: String,
    /// Argon2 password hash - response types must never carry it
    password_hash: String,
    role: UserRole,
    status: UserStatus,
    job_profile_id: Option<JobProfileId>,
    /// Set after an administrator resets the password
    must_change_password: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user from an already hashed password
    pub fn new(
        company_id: CompanyId,
        data: NewUser,
        password_hash: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        let name = data.name.trim().to_string();
        let email = normalize_email(&data.email);

        validate_user_name(&name)?;
        validate_user_email(&email)?;

        let now = Utc::now();

        Ok(Self {
            id: UserId::generate(),
            company_id,
            name,
            email,
            password_hash: password_hash.into(),
            role: data.role,
            status: UserStatus::default(),
            job_profile_id: data.job_profile_id,
            must_change_password: data.must_change_password,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    // Getters

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn status(&self) -> UserStatus {
        self.status
    }

    pub fn job_profile_id(&self) -> Option<&JobProfileId> {
        self.job_profile_id.as_ref()
    }

    pub fn must_change_password(&self) -> bool {
        self.must_change_password
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Check if the user is active and can log in
    pub fn is_active(&self) -> bool {
        self.status.can_login()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    // Mutators

    /// Apply a partial update, validating every provided field first
    pub fn apply(&mut self, changes: UserChanges) -> Result<(), UserValidationError> {
        let name = changes.name.map(|n| n.trim().to_string());
        let email = changes.email.as_deref().map(normalize_email);

        if let Some(name) = &name {
            validate_user_name(name)?;
        }
        if let Some(email) = &email {
            validate_user_email(email)?;
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(job_profile_id) = changes.job_profile_id {
            self.job_profile_id = job_profile_id;
        }

        self.touch();
        Ok(())
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        self.touch();
    }

    pub fn set_status(&mut self, status: UserStatus) {
        self.status = status;
        self.touch();
    }

    /// Replace the password hash
    ///
    /// `must_change` forces a change on next use (temporary passwords).
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>, must_change: bool) {
        self.password_hash = password_hash.into();
        self.must_change_password = must_change;
        self.touch();
    }

    /// Record a login
    pub fn record_login(&mut self) {
        self.last_login_at = Some(Utc::now());
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        self.set_status(UserStatus::Inactive);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl TenantScoped for User {
    fn company_id(&self) -> &CompanyId {
        &self.company_id
    }
}

impl StorageEntity for User {
    type Key = UserId;
    const COLLECTION: &'static str = "users";

    fn key(&self) -> &Self::Key {
        &self.id
    }

    fn unique_constraints() -> Vec<UniqueConstraint> {
        vec![UniqueConstraint::new("company_email", &["company_id", "email"]).case_insensitive()]
    }

    fn indexes() -> Vec<&'static [&'static str]> {
        vec![
            &["company_id", "role"],
            &["company_id", "status"],
            &["company_id", "job_profile_id"],
        ]
    }
}
