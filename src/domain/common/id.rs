//! UUID-backed entity identifiers

/// Declares a UUID v4 identifier newtype
///
/// The generated type serializes as its string form, rejects anything that
/// is not a UUID, and can be used directly as a storage key.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random identifier
            pub fn generate() -> Self {
                Self(::uuid::Uuid::new_v4().to_string())
            }

            /// Parse an identifier, normalizing it to lowercase hyphenated form
            pub fn parse(value: &str) -> Result<Self, $crate::domain::DomainError> {
                ::uuid::Uuid::parse_str(value.trim())
                    .map(|uuid| Self(uuid.to_string()))
                    .map_err(|_| {
                        $crate::domain::DomainError::invalid_id(format!(
                            "Identificador de {} inválido: '{}'",
                            $label, value
                        ))
                    })
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::domain::DomainError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(&value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl $crate::domain::storage::StorageKey for $name {
            fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}

pub(crate) use define_id;

#[cfg(test)]
mod tests {
    use crate::domain::DomainError;

    define_id!(
        /// Identifier used only by these tests
        SampleId,
        "muestra"
    );

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(SampleId::generate(), SampleId::generate());
    }

    #[test]
    fn test_parse_normalizes_case() {
        let id = SampleId::parse("67E55044-10B1-426F-9247-BB680E5FE0C8").unwrap();
        assert_eq!(id.as_str(), "67e55044-10b1-426f-9247-bb680e5fe0c8");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = SampleId::parse("not-a-uuid").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId { .. }));
        assert!(err.to_string().contains("muestra"));
    }

    #[test]
    fn test_serde_round_trip() {
        let id = SampleId::generate();
        let json = serde_json::to_string(&id).unwrap();
        let back: SampleId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);

        assert!(serde_json::from_str::<SampleId>("\"bogus\"").is_err());
    }
}
