//! User use cases

use std::sync::Arc;

use rand::Rng;
use rand::distributions::Alphanumeric;
use tracing::{debug, info, warn};

use crate::domain::DomainError;
use crate::domain::common::CompanyId;
use crate::domain::common::validation::normalize_email;
use crate::domain::search::{Page, SearchCriteria};
use crate::domain::user::{
    NewUser, User, UserChanges, UserId, UserRepository, UserRole, UserSearchCriteria, UserStatus,
    validate_password,
};
use crate::infrastructure::auth::PasswordHasher;

/// Length of passwords generated by an administrator reset
pub const TEMPORARY_PASSWORD_LENGTH: usize = 16;

const INVALID_CREDENTIALS: &str = "Credenciales inválidas";

/// User service for account management and authentication
#[derive(Debug)]
pub struct UserService<R: UserRepository + ?Sized, H: PasswordHasher + ?Sized> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository + ?Sized, H: PasswordHasher + ?Sized> UserService<R, H> {
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Create a user with an initial password
    pub async fn create(
        &self,
        company_id: &CompanyId,
        data: NewUser,
        password: &str,
    ) -> Result<User, DomainError> {
        info!(company_id = %company_id, email = %data.email, role = %data.role, "Creating user");

        validate_password(password)?;
        self.ensure_email_available(company_id, &data.email, None)
            .await?;

        let password_hash = self.hasher.hash(password)?;
        let user = User::new(company_id.clone(), data, password_hash)?;

        self.repository.save(user).await
    }

    pub async fn get(&self, company_id: &CompanyId, id: &str) -> Result<User, DomainError> {
        debug!(company_id = %company_id, id = %id, "Getting user");

        let user_id = UserId::parse(id)?;
        self.find(company_id, &user_id).await
    }

    /// Load the user behind an authenticated request
    ///
    /// A token outlives account changes, so a user that has been removed,
    /// suspended or deactivated since issue is rejected here.
    pub async fn get_active(
        &self,
        company_id: &CompanyId,
        id: &str,
    ) -> Result<User, DomainError> {
        let user = UserId::parse(id)
            .map_err(|_| DomainError::unauthorized("Token inválido o expirado"))?;

        match self.repository.find_by_id(company_id, &user).await? {
            Some(user) if user.is_active() => Ok(user),
            _ => Err(DomainError::unauthorized("El usuario no está activo")),
        }
    }

    pub async fn search(&self, criteria: &UserSearchCriteria) -> Result<Page<User>, DomainError> {
        debug!(company_id = %criteria.company_id(), "Searching users");

        self.repository.find_page(criteria).await
    }

    pub async fn update(
        &self,
        company_id: &CompanyId,
        id: &str,
        changes: UserChanges,
    ) -> Result<User, DomainError> {
        info!(company_id = %company_id, id = %id, "Updating user");

        let mut user = self.get(company_id, id).await?;

        if let Some(email) = &changes.email {
            self.ensure_email_available(company_id, email, Some(user.id()))
                .await?;
        }

        user.apply(changes)?;
        self.repository.update(user).await
    }

    pub async fn assign_role(
        &self,
        company_id: &CompanyId,
        actor: &UserId,
        id: &str,
        role: UserRole,
    ) -> Result<User, DomainError> {
        info!(company_id = %company_id, id = %id, role = %role, "Assigning user role");

        let mut user = self.get(company_id, id).await?;

        if user.id() == actor && user.is_admin() && !role.is_admin() {
            return Err(DomainError::forbidden(
                "Un administrador no puede quitarse su propio rol",
            ));
        }

        user.set_role(role);
        self.repository.update(user).await
    }

    pub async fn change_status(
        &self,
        company_id: &CompanyId,
        actor: &UserId,
        id: &str,
        status: UserStatus,
    ) -> Result<User, DomainError> {
        info!(company_id = %company_id, id = %id, status = %status, "Changing user status");

        let mut user = self.get(company_id, id).await?;

        if user.id() == actor && !status.can_login() {
            return Err(DomainError::forbidden(
                "Un administrador no puede desactivar su propia cuenta",
            ));
        }

        user.set_status(status);
        self.repository.update(user).await
    }

    /// Replace a user's password with a generated one
    ///
    /// The plain temporary password is returned once and never stored; the
    /// user must change it on next login.
    pub async fn reset_password(
        &self,
        company_id: &CompanyId,
        id: &str,
    ) -> Result<(User, String), DomainError> {
        info!(company_id = %company_id, id = %id, "Resetting user password");

        let mut user = self.get(company_id, id).await?;

        let temporary = generate_temporary_password();
        let password_hash = self.hasher.hash(&temporary)?;
        user.set_password_hash(password_hash, true);

        let user = self.repository.update(user).await?;
        Ok((user, temporary))
    }

    pub async fn change_own_password(
        &self,
        company_id: &CompanyId,
        id: &UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<User, DomainError> {
        info!(company_id = %company_id, id = %id, "Changing own password");

        let mut user = self.find(company_id, id).await?;

        if !self.hasher.verify(current_password, user.password_hash()) {
            return Err(DomainError::validation("La contraseña actual es incorrecta"));
        }
        validate_password(new_password)?;

        let password_hash = self.hasher.hash(new_password)?;
        user.set_password_hash(password_hash, false);

        self.repository.update(user).await
    }

    /// Check credentials and record the login
    pub async fn authenticate(
        &self,
        company_id: &CompanyId,
        email: &str,
        password: &str,
    ) -> Result<User, DomainError> {
        debug!(company_id = %company_id, email = %email, "Authenticating user");

        let Some(mut user) = self.repository.find_by_email(company_id, email).await? else {
            warn!(company_id = %company_id, "Login attempt for unknown email");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify(password, user.password_hash()) {
            warn!(company_id = %company_id, id = %user.id(), "Login attempt with wrong password");
            return Err(DomainError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_active() {
            return Err(DomainError::unauthorized("El usuario no está activo"));
        }

        user.record_login();
        let user = self.repository.update(user).await?;

        info!(company_id = %company_id, id = %user.id(), "User logged in");
        Ok(user)
    }

    /// Soft delete: the account is kept as INACTIVE
    pub async fn delete(
        &self,
        company_id: &CompanyId,
        actor: &UserId,
        id: &str,
    ) -> Result<User, DomainError> {
        info!(company_id = %company_id, id = %id, "Deactivating user");

        let mut user = self.get(company_id, id).await?;

        if user.id() == actor {
            return Err(DomainError::forbidden(
                "Un administrador no puede eliminar su propia cuenta",
            ));
        }

        user.deactivate();
        self.repository.update(user).await
    }

    /// Create the first administrator of a company that has no users yet
    ///
    /// Returns `None` when the company already has users.
    pub async fn bootstrap_admin(
        &self,
        company_id: &CompanyId,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        if self.repository.count_in_company(company_id).await? > 0 {
            debug!(company_id = %company_id, "Company already has users, skipping bootstrap");
            return Ok(None);
        }

        let admin = self
            .create(
                company_id,
                NewUser {
                    name: name.to_string(),
                    email: email.to_string(),
                    role: UserRole::Admin,
                    job_profile_id: None,
                    must_change_password: true,
                },
                password,
            )
            .await?;

        info!(company_id = %company_id, email = %admin.email(), "Bootstrapped administrator");
        Ok(Some(admin))
    }

    async fn find(&self, company_id: &CompanyId, id: &UserId) -> Result<User, DomainError> {
        self.repository
            .find_by_id(company_id, id)
            .await?
            .ok_or_else(|| DomainError::not_found("Usuario no encontrado"))
    }

    async fn ensure_email_available(
        &self,
        company_id: &CompanyId,
        email: &str,
        current: Option<&UserId>,
    ) -> Result<(), DomainError> {
        if let Some(existing) = self.repository.find_by_email(company_id, email).await? {
            if Some(existing.id()) != current {
                return Err(DomainError::conflict(format!(
                    "Ya existe un usuario con el email {}",
                    normalize_email(email)
                )));
            }
        }
        Ok(())
    }
}

fn generate_temporary_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMPORARY_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}
