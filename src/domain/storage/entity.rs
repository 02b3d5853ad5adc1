//! Storage entity traits and types

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::domain::search::COMPANY_FIELD;

/// Trait for types that can be used as storage keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the key as a string for storage backends that require string keys
    fn as_str(&self) -> &str;
}

/// A set of document fields whose combined values must be unique in a collection
///
/// Documents where any of the fields is missing or null are not constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueConstraint {
    /// Constraint name, used for index naming and error messages
    pub name: &'static str,
    /// Top-level document fields covered by the constraint
    pub fields: &'static [&'static str],
    /// Compare string values ignoring case
    pub case_insensitive: bool,
}

impl UniqueConstraint {
    pub const fn new(name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            name,
            fields,
            case_insensitive: false,
        }
    }

    pub const fn case_insensitive(mut self) -> Self {
        self.case_insensitive = true;
        self
    }

    /// Whether values of `field` are compared ignoring case
    ///
    /// The tenant key is always compared exactly: tenants whose ids differ
    /// only in case are distinct.
    pub fn folds_case(&self, field: &str) -> bool {
        self.case_insensitive && field != COMPANY_FIELD
    }

    /// Returns the comparable values of this constraint for a document
    pub fn values_of(&self, document: &Value) -> Option<Vec<String>> {
        self.fields
            .iter()
            .map(|field| match document.get(*field)? {
                Value::String(s) if self.folds_case(field) => Some(s.to_lowercase()),
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect()
    }

    /// Caller-facing message for a violation of this constraint
    pub fn conflict_message(&self) -> String {
        let fields: Vec<&str> = self
            .fields
            .iter()
            .copied()
            .filter(|f| *f != COMPANY_FIELD)
            .collect();

        format!(
            "Ya existe un registro con el mismo valor de {}",
            fields.join(", ")
        )
    }
}

/// Trait for types that can be stored
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Collection (table) holding documents of this type
    const COLLECTION: &'static str;

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;

    /// Uniqueness rules the storage backend must enforce
    fn unique_constraints() -> Vec<UniqueConstraint> {
        Vec::new()
    }

    /// Field combinations worth indexing for filtering
    fn indexes() -> Vec<&'static [&'static str]> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    struct TestKey(String);

    impl StorageKey for TestKey {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct TestEntity {
        id: TestKey,
        name: String,
    }

    impl StorageEntity for TestEntity {
        type Key = TestKey;
        const COLLECTION: &'static str = "test_entities";

        fn key(&self) -> &Self::Key {
            &self.id
        }
    }

    #[test]
    fn test_storage_entity_key() {
        let entity = TestEntity {
            id: TestKey("entity-1".to_string()),
            name: "Test".to_string(),
        };
        assert_eq!(entity.key().as_str(), "entity-1");
        assert_eq!(TestEntity::COLLECTION, "test_entities");
        assert!(TestEntity::unique_constraints().is_empty());
    }

    #[test]
    fn test_unique_constraint_values() {
        let constraint =
            UniqueConstraint::new("company_email", &["company_id", "email"]).case_insensitive();
        let doc = json!({ "company_id": "acme", "email": "Jo@Example.com" });

        assert_eq!(
            constraint.values_of(&doc),
            Some(vec!["acme".to_string(), "jo@example.com".to_string()])
        );
    }

    #[test]
    fn test_unique_constraint_keeps_tenant_case() {
        let constraint =
            UniqueConstraint::new("company_email", &["company_id", "email"]).case_insensitive();
        let lower = json!({ "company_id": "acme", "email": "info@globex.com" });
        let upper = json!({ "company_id": "ACME", "email": "INFO@globex.com" });

        assert_eq!(
            constraint.values_of(&upper),
            Some(vec!["ACME".to_string(), "info@globex.com".to_string()])
        );
        assert_ne!(constraint.values_of(&lower), constraint.values_of(&upper));
        assert!(!constraint.folds_case("company_id"));
        assert!(constraint.folds_case("email"));
    }

    #[test]
    fn test_unique_constraint_skips_null_fields() {
        let constraint = UniqueConstraint::new("company_tax", &["company_id", "tax_id"]);
        let doc = json!({ "company_id": "acme", "tax_id": null });

        assert_eq!(constraint.values_of(&doc), None);
    }

    #[test]
    fn test_conflict_message_omits_tenant_field() {
        let constraint = UniqueConstraint::new("company_code", &["company_id", "code"]);
        assert_eq!(
            constraint.conflict_message(),
            "Ya existe un registro con el mismo valor de code"
        );
    }
}
