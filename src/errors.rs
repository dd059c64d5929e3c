//! # Error Handling
//!
//! Invalid filter *content* (blank paths, empty values, unparseable dates) is not an
//! error: such filters are dropped by [`FilterCollection`](crate::filtering::FilterCollection)
//! before any parameter is built. The errors below are reserved for malformed
//! construction arguments (operator names, strict dates), which should fail fast instead of producing a query string
//! the backend would silently misread.

use thiserror::Error;

/// Errors raised while constructing filter descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Unknown filter operator: '{0}'. Valid operators are: EQ, NEQ, LIKE, LT, LE, GT, GE")]
    UnknownOperator(String),

    #[error("Unknown nesting operator: '{0}'. Valid operators are: AND, OR, NOT")]
    UnknownNestingOperator(String),

    #[error("Invalid date: '{0}'. Expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
