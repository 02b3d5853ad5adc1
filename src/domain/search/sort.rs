use std::fmt::Debug;
use std::str::FromStr;

use crate::domain::DomainError;
use crate::domain::storage::{SortKind, SortOrder, SortSpec};

/// A module's sortable fields
pub trait SortField: Copy + Debug + Send + Sync + FromStr<Err = DomainError> {
    /// Document field the sort applies to
    fn field(&self) -> &'static str;

    fn kind(&self) -> SortKind {
        SortKind::Value
    }
}

/// Sort directive over a typed field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort<F: SortField> {
    pub field: F,
    pub order: SortOrder,
}

impl<F: SortField> Sort<F> {
    pub fn new(field: F, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn asc(field: F) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: F) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    /// Parse `sort_by`/`sort_order` query values
    pub fn parse(field: &str, order: Option<&str>) -> Result<Self, DomainError> {
        let order = order.map(str::parse).transpose()?.unwrap_or_default();
        Ok(Self::new(field.parse()?, order))
    }

    pub fn to_spec(&self) -> SortSpec {
        SortSpec::new(self.field.field(), self.order).with_kind(self.field.kind())
    }
}

/// Builds an "unknown sort field" validation error
pub fn unknown_sort_field(field: &str) -> DomainError {
    DomainError::validation(format!("Campo de ordenación no soportado: '{}'", field))
}

/// Declares a module's sortable fields, parsed from snake_case or camelCase
///
/// A field written `Variant => "field": Timestamp` sorts chronologically.
macro_rules! sort_fields {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $field:literal $(: $kind:ident)?),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant,)+
        }

        impl $crate::domain::search::SortField for $name {
            fn field(&self) -> &'static str {
                match self {
                    $(Self::$variant => $field,)+
                }
            }

            fn kind(&self) -> $crate::domain::storage::SortKind {
                match self {
                    $(Self::$variant => {
                        #[allow(unused_mut)]
                        let mut kind = $crate::domain::storage::SortKind::Value;
                        $(kind = $crate::domain::storage::SortKind::$kind;)?
                        kind
                    })+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::domain::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().replace('_', "").to_lowercase();
                $(
                    if $field.replace('_', "") == wanted {
                        return Ok(Self::$variant);
                    }
                )+
                Err($crate::domain::search::unknown_sort_field(s))
            }
        }
    };
}

pub(crate) use sort_fields;

#[cfg(test)]
mod tests {
    use super::*;

    sort_fields!(SampleSort {
        Name => "name",
        CreatedAt => "created_at": Timestamp,
    });

    #[test]
    fn test_parse_accepts_snake_and_camel_case() {
        assert_eq!("created_at".parse::<SampleSort>().unwrap(), SampleSort::CreatedAt);
        assert_eq!("createdAt".parse::<SampleSort>().unwrap(), SampleSort::CreatedAt);
        assert!("salary".parse::<SampleSort>().is_err());
    }

    #[test]
    fn test_sort_parse_with_order() {
        let sort = Sort::<SampleSort>::parse("name", Some("DESC")).unwrap();
        assert_eq!(sort.to_spec(), SortSpec::new("name", SortOrder::Desc));

        let sort = Sort::<SampleSort>::parse("name", None).unwrap();
        assert_eq!(sort.order, SortOrder::Asc);
    }

    #[test]
    fn test_timestamp_fields_carry_their_kind() {
        assert_eq!(SampleSort::Name.kind(), SortKind::Value);
        assert_eq!(
            Sort::desc(SampleSort::CreatedAt).to_spec(),
            SortSpec::new("created_at", SortOrder::Desc).with_kind(SortKind::Timestamp)
        );
    }
}
