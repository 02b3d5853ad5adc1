//! String-backed enumerations stored and exchanged in SCREAMING_SNAKE_CASE

/// Declares a closed set of string values (status, type, role, ...)
///
/// Generates serde renames, `as_str`, `ALL`, a case-insensitive `FromStr`
/// that fails with a validation error, `Display`, and a conversion into a
/// query [`FilterValue`](crate::domain::storage::FilterValue).
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $value)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $value,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_uppercase();

                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| {
                        $crate::domain::DomainError::validation(format!(
                            "Valor inválido para {}: '{}'",
                            $label, s
                        ))
                    })
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl From<$name> for $crate::domain::storage::FilterValue {
            fn from(value: $name) -> Self {
                Self::String(value.as_str().to_string())
            }
        }
    };
}

pub(crate) use string_enum;
