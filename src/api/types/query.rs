//! Query string extraction for list endpoints

use std::str::FromStr;

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::domain::DomainError;
use crate::domain::search::{DateRange, Pagination, Sort, SortField};

/// Query string extractor that rejects with the API error envelope
#[derive(Debug, Clone, Default)]
pub struct Query<T>(pub T);

impl<S, T> FromRequestParts<S> for Query<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        axum::extract::Query::<T>::from_request_parts(parts, state)
            .await
            .map(|axum::extract::Query(value)| Self(value))
            .map_err(|rejection| {
                ApiError::bad_request(format!(
                    "Parámetros de consulta inválidos: {}",
                    rejection.body_text()
                ))
            })
    }
}

/// `page`, `limit`, `sort_by` and `sort_order`, shared by every list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

impl ListParams {
    /// Out-of-range values are rejected, not clamped
    pub fn pagination(&self) -> Result<Pagination, DomainError> {
        Pagination::try_new(self.page, self.limit)
    }

    pub fn sort<F: SortField>(&self) -> Result<Option<Sort<F>>, DomainError> {
        self.sort_by
            .as_deref()
            .map(|field| Sort::parse(field, self.sort_order.as_deref()))
            .transpose()
    }
}

/// Parse an optional query value with the type's own `FromStr`
pub fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, DomainError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse)
        .transpose()
}

/// Inclusive range from two optional bounds
pub fn date_range(
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> Result<DateRange, DomainError> {
    DateRange::new(from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::{ClientSortField, ClientStatus};
    use crate::domain::storage::SortOrder;
    use axum::http::Request;

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::default();

        assert_eq!(params.pagination().unwrap(), Pagination::default());
        assert!(params.sort::<ClientSortField>().unwrap().is_none());
    }

    #[test]
    fn test_list_params_sort() {
        let params = ListParams {
            sort_by: Some("name".to_string()),
            sort_order: Some("desc".to_string()),
            ..Default::default()
        };

        let sort = params.sort::<ClientSortField>().unwrap().unwrap();
        assert_eq!(sort.field, ClientSortField::Name);
        assert_eq!(sort.order, SortOrder::Desc);
    }

    #[test]
    fn test_list_params_reject_bad_values() {
        let params = ListParams {
            limit: Some(500),
            sort_by: Some("password_hash".to_string()),
            ..Default::default()
        };

        assert!(params.pagination().is_err());
        assert!(params.sort::<ClientSortField>().is_err());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(
            parse_optional::<ClientStatus>(Some("inactive")).unwrap(),
            Some(ClientStatus::Inactive)
        );
        assert_eq!(parse_optional::<ClientStatus>(Some(" ")).unwrap(), None);
        assert!(parse_optional::<ClientStatus>(Some("GONE")).is_err());
    }

    #[tokio::test]
    async fn test_query_extractor_rejects_with_envelope() {
        let (mut parts, _) = Request::builder()
            .uri("/api/clients?page=abc")
            .body(())
            .unwrap()
            .into_parts();

        let err = Query::<ListParams>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();

        assert_eq!(err.status, axum::http::StatusCode::BAD_REQUEST);
        assert!(!err.response.success);
    }
}
