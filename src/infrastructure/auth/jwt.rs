//! JWT token generation and validation

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::DomainError;
use crate::domain::traits::TenantScoped;
use crate::domain::user::User;

/// Upper bound on token lifetime, ten years
pub const MAX_EXPIRATION_HOURS: u64 = 24 * 365 * 10;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Tenant the user belongs to
    pub company_id: String,
    /// Role at issue time; authorization re-reads the stored user
    pub role: String,
    /// Issued at timestamp (Unix epoch)
    pub iat: i64,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl JwtClaims {
    pub fn new(user: &User, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let hours = expiration_hours.min(MAX_EXPIRATION_HOURS) as i64;
        let exp = now + Duration::hours(hours);

        Self {
            sub: user.id().as_str().to_string(),
            company_id: user.company_id().as_str().to_string(),
            role: user.role().as_str().to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// A signed token and the instant its `exp` claim points at
#[derive(Debug, Clone, PartialEq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Configuration for JWT service
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: u64,
}

impl Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[hidden]")
            .field("expiration_hours", &self.expiration_hours)
            .finish()
    }
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_hours: u64) -> Self {
        Self {
            secret: secret.into(),
            expiration_hours,
        }
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
        }
    }
}

/// Trait for JWT operations
pub trait JwtGenerator: Send + Sync + Debug {
    /// Generate a JWT token for a user
    fn generate(&self, user: &User) -> Result<IssuedToken, DomainError>;

    /// Validate a JWT token and return the claims
    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError>;
}

/// HS256 JWT service signed with a shared secret
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl JwtService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl JwtGenerator for JwtService {
    fn generate(&self, user: &User) -> Result<IssuedToken, DomainError> {
        let claims = JwtClaims::new(user, self.config.expiration_hours);
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| DomainError::internal("JWT expiration out of range"))?;

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to generate JWT: {}", e)))?;

        Ok(IssuedToken { token, expires_at })
    }

    fn validate(&self, token: &str) -> Result<JwtClaims, DomainError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| DomainError::unauthorized("Token inválido o expirado"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::CompanyId;
    use crate::domain::user::{NewUser, UserRole};

    fn create_user() -> User {
        User::new(
            CompanyId::new("acme").unwrap(),
            NewUser {
                name: "Ana Pérez".to_string(),
                email: "ana@acme.com".to_string(),
                role: UserRole::Auditor,
                job_profile_id: None,
                must_change_password: false,
            },
            "hash",
        )
        .unwrap()
    }

    #[test]
    fn test_generate_and_validate() {
        let service = JwtService::new(JwtConfig::new("test-secret", 1));
        let user = create_user();

        let issued = service.generate(&user).unwrap();
        let claims = service.validate(&issued.token).unwrap();

        assert_eq!(claims.sub, user.id().as_str());
        assert_eq!(claims.company_id, "acme");
        assert_eq!(claims.role, "AUDITOR");
        assert!(!claims.is_expired());
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(issued.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn test_expiration_is_clamped() {
        let service = JwtService::new(JwtConfig::new("test-secret", u64::MAX));

        let issued = service.generate(&create_user()).unwrap();
        let claims = service.validate(&issued.token).unwrap();

        assert_eq!(claims.exp - claims.iat, MAX_EXPIRATION_HOURS as i64 * 3600);
        assert_eq!(issued.expires_at.timestamp(), claims.exp);
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let issuer = JwtService::new(JwtConfig::new("secret-a", 1));
        let verifier = JwtService::new(JwtConfig::new("secret-b", 1));

        let issued = issuer.generate(&create_user()).unwrap();

        assert!(matches!(
            verifier.validate(&issued.token),
            Err(DomainError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_garbage_token() {
        let service = JwtService::new(JwtConfig::default());
        assert!(service.validate("not.a.token").is_err());
    }

    #[test]
    fn test_config_debug_hides_secret() {
        let rendered = format!("{:?}", JwtConfig::new("super-secret", 8));
        assert!(!rendered.contains("super-secret"));
    }
}
