//! Build CRNK (JSON:API) query parameters from typed filter, sort, include, sparse
//! fieldset and pagination descriptors.
//!
//! ```
//! use crnk_query::{FilterOperator, FilterSpec, NestedFilter, PaginationSpec};
//!
//! let filter = NestedFilter::new(FilterSpec::new("user.name", "Emil", FilterOperator::Like))
//!     .include(["user"]);
//! let params = PaginationSpec::new(3, 20, 0).set_http_params(filter.http_params());
//!
//! assert_eq!(
//!     params.to_string(),
//!     r#"include=user&filter={"user": {"LIKE": {"name": "Emil%"}}}&page[limit]=20&page[offset]=60"#
//! );
//! ```

pub mod encoding;
pub mod errors;
pub mod filtering;
pub mod models;
pub mod params;

pub use encoding::{BasicFilter, FilterNode, NestedFilter};
pub use errors::{FilterError, Result};
pub use filtering::{
    FilterCollection, FilterOperator, FilterSpec, FilterValue, NestingOperator, PageEvent,
    PaginationSpec, SanitizedValue, Scalar, SortDirection, SortSpec, ValidFilter,
};
pub use models::{BasicQueryParameters, NestedQueryParameters};
pub use params::QueryParams;
pub use serde_with;
