//! Criteria pieces shared by every module's search: pagination, date ranges,
//! typed sorting and result pages

mod criteria;
mod date_range;
mod page;
mod pagination;
mod sort;

pub use criteria::{COMPANY_FIELD, SearchCriteria};
pub use date_range::DateRange;
pub use page::Page;
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, Pagination};
pub(crate) use sort::sort_fields;
pub use sort::{Sort, SortField, unknown_sort_field};
