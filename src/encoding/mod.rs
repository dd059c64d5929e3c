//! # Filter Encoders
//!
//! Two wire styles for the same [`FilterSpec`](crate::FilterSpec) list:
//!
//! - [`basic`]: one `filter[<path>][<OP>]=<value>` parameter per filter.
//! - [`nested`]: a single `filter` parameter holding a `{"AND": [...]}` style expression.
//!
//! Both emit `include`, then the filter parameter(s), then `fields`, then `sort`.
//! Pagination is added separately with [`PaginationSpec::set_http_params`](crate::PaginationSpec::set_http_params).

pub mod basic;
pub mod nested;

pub use basic::BasicFilter;
pub use nested::{FilterNode, NestedFilter};
