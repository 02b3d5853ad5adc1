use serde::Serialize;

use crate::domain::DomainError;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

/// One-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Build a pagination, clamping page to `>= 1` and limit to `1..=100`
    pub fn clamped(page: i64, limit: i64) -> Self {
        Self {
            page: page.clamp(1, i64::from(u32::MAX)) as u32,
            limit: limit.clamp(1, i64::from(MAX_LIMIT)) as u32,
        }
    }

    /// Build a pagination from caller input, rejecting out-of-range values
    pub fn try_new(page: Option<i64>, limit: Option<i64>) -> Result<Self, DomainError> {
        let page = page.unwrap_or(i64::from(DEFAULT_PAGE));
        let limit = limit.unwrap_or(i64::from(DEFAULT_LIMIT));

        if page < 1 || page > i64::from(u32::MAX) {
            return Err(DomainError::validation(
                "El número de página debe ser mayor o igual a 1",
            ));
        }

        if !(1..=i64::from(MAX_LIMIT)).contains(&limit) {
            return Err(DomainError::validation(format!(
                "El límite debe estar entre 1 y {}",
                MAX_LIMIT
            )));
        }

        Ok(Self::clamped(page, limit))
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of documents to skip: `(page - 1) * limit`
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_page_minus_one_times_limit() {
        for (page, limit) in [(1, 10), (2, 10), (3, 25), (7, 100)] {
            let p = Pagination::clamped(page, limit);
            assert_eq!(p.offset(), ((page - 1) * limit) as u64);
        }
    }

    #[test]
    fn test_clamped_fixes_out_of_range_values() {
        let p = Pagination::clamped(-3, 0);
        assert_eq!((p.page(), p.limit(), p.offset()), (1, 1, 0));

        let p = Pagination::clamped(2, 5000);
        assert_eq!(p.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_try_new_defaults() {
        let p = Pagination::try_new(None, None).unwrap();
        assert_eq!(p, Pagination::default());
        assert_eq!((p.page(), p.limit()), (DEFAULT_PAGE, DEFAULT_LIMIT));
    }

    #[test]
    fn test_try_new_rejects_out_of_range() {
        assert!(Pagination::try_new(Some(0), None).is_err());
        assert!(Pagination::try_new(None, Some(0)).is_err());
        assert!(Pagination::try_new(None, Some(101)).is_err());
        assert!(Pagination::try_new(Some(3), Some(100)).is_ok());
    }
}
