//! Authentication infrastructure - JWT tokens and password hashing

mod jwt;
mod password;

pub use jwt::{IssuedToken, JwtClaims, JwtConfig, JwtGenerator, JwtService, MAX_EXPIRATION_HOURS};
pub use password::{Argon2Hasher, PasswordHasher};

#[cfg(test)]
pub use password::MockPasswordHasher;
