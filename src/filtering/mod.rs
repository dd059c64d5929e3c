//! # Filter Specifications
//!
//! Typed descriptors for everything that ends up in a CRNK query string: filter
//! conditions, sort orders, included resources, sparse fieldsets and pagination.
//!
//! ## Pipeline
//!
//! 1. Callers build [`FilterSpec`]s from raw values ([`FilterValue`]).
//! 2. [`FilterCollection`] validates them: paths are trimmed, values sanitized, invalid
//!    specs dropped. The survivors are [`ValidFilter`]s.
//! 3. An encoder (see [`crate::encoding`]) formats the valid filters.
//!
//! ## Value rules
//!
//! ```rust,ignore
//! "  Mazda   "                  -> "Mazda"
//! [13513, undefined, 23151]     -> [13513, 23151]
//! ["", "  "]                    -> dropped
//! null (nullable)               -> null
//! null (not nullable)           -> dropped
//! ```

pub mod collection;
pub mod operators;
pub mod pagination;
pub mod resources;
pub mod sort;
pub mod spec;
pub mod value;

pub use collection::{FilterCollection, filter_array};
pub use operators::{FilterOperator, NestingOperator};
pub use pagination::{PageEvent, PaginationSpec};
pub use resources::join_names;
pub use sort::{SortDirection, SortSpec, sorting_params};
pub use spec::{FilterSpec, ValidFilter};
pub use value::{FilterValue, SanitizedValue, Scalar};
