use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::FilterError;

/// Comparison operators understood by CRNK filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FilterOperator {
    /// Equality (`EQ`)
    #[default]
    Eq,
    /// Not equal (`NEQ`)
    Neq,
    /// LIKE pattern matching (`LIKE`), values get a trailing `%`
    Like,
    /// Less than (`LT`)
    Lt,
    /// Less than or equal (`LE`)
    Le,
    /// Greater than (`GT`)
    Gt,
    /// Greater than or equal (`GE`)
    Ge,
}

impl FilterOperator {
    /// Wire name used inside `filter[path][OP]` keys and nested filter strings
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::Neq => "NEQ",
            Self::Like => "LIKE",
            Self::Lt => "LT",
            Self::Le => "LE",
            Self::Gt => "GT",
            Self::Ge => "GE",
        }
    }

    #[must_use]
    pub const fn is_like(self) -> bool {
        matches!(self, Self::Like)
    }
}

impl FromStr for FilterOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EQ" => Ok(Self::Eq),
            "NEQ" => Ok(Self::Neq),
            "LIKE" => Ok(Self::Like),
            "LT" => Ok(Self::Lt),
            "LE" => Ok(Self::Le),
            "GT" => Ok(Self::Gt),
            "GE" => Ok(Self::Ge),
            _ => Err(FilterError::UnknownOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for FilterOperator {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FilterOperator> for String {
    fn from(operator: FilterOperator) -> Self {
        operator.as_str().to_string()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Boolean operators used to compose several nested filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NestingOperator {
    #[default]
    And,
    Or,
    Not,
}

impl NestingOperator {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
        }
    }
}

impl FromStr for NestingOperator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(Self::And),
            "OR" => Ok(Self::Or),
            "NOT" => Ok(Self::Not),
            _ => Err(FilterError::UnknownNestingOperator(s.to_string())),
        }
    }
}

impl TryFrom<String> for NestingOperator {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NestingOperator> for String {
    fn from(operator: NestingOperator) -> Self {
        operator.as_str().to_string()
    }
}

impl fmt::Display for NestingOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
