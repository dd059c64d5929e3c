use serde::{Deserialize, Serialize};

use super::operators::FilterOperator;
use super::value::{FilterValue, SanitizedValue};

/// One filter condition as supplied by the caller.
///
/// A spec is only a request: [`FilterSpec::validate`] decides whether it becomes part of
/// the query. Invalid specs (blank path, empty or null value on a non-nullable spec) are
/// dropped, they never raise errors.
///
/// # Example
/// ```
/// use crnk_query::{FilterOperator, FilterSpec};
///
/// let spec = FilterSpec::new("user.name", "Auto", FilterOperator::Like);
/// let valid = spec.validate().unwrap();
/// assert_eq!(valid.prepare_for_flat_encoding(), "Auto%");
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Dotted attribute path, e.g. `user.address.city`
    pub path: String,
    #[serde(default, skip_serializing_if = "FilterValue::is_absent")]
    pub value: FilterValue,
    #[serde(default)]
    pub operator: FilterOperator,
    /// When set, an explicit `null` value is a valid "IS NULL" filter
    #[serde(default)]
    pub nullable: bool,
}

impl FilterSpec {
    pub fn new(
        path: impl Into<String>,
        value: impl Into<FilterValue>,
        operator: FilterOperator,
    ) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
            operator,
            nullable: false,
        }
    }

    /// Equality filter, the default operator.
    pub fn equals(path: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(path, value, FilterOperator::Eq)
    }

    /// Filter whose `null` value means "IS NULL" instead of "no filter".
    pub fn nullable(
        path: impl Into<String>,
        value: impl Into<FilterValue>,
        operator: FilterOperator,
    ) -> Self {
        Self {
            nullable: true,
            ..Self::new(path, value, operator)
        }
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Whether this spec survives validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_some()
    }

    /// Trim the path, sanitize the value and derive the relation segments.
    ///
    /// Returns `None` when the path is blank or the value does not survive sanitizing.
    #[must_use]
    pub fn validate(&self) -> Option<ValidFilter> {
        let path = self.path.trim();
        if path.is_empty() {
            return None;
        }
        let value = self.value.sanitize(self.nullable)?;

        let mut segments: Vec<String> = path.split('.').map(str::to_string).collect();
        let leaf_attribute = segments.pop().unwrap_or_default();
        segments.reverse();

        Some(ValidFilter {
            path: path.to_string(),
            value,
            operator: self.operator,
            relation_segments: segments,
            leaf_attribute,
        })
    }
}

/// A filter that passed validation.
///
/// Everything here is computed once by [`FilterSpec::validate`]; the `prepare_*` methods
/// are pure, so repeated encoding yields identical output.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidFilter {
    path: String,
    value: SanitizedValue,
    operator: FilterOperator,
    relation_segments: Vec<String>,
    leaf_attribute: String,
}

impl ValidFilter {
    /// Trimmed dotted path
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn value(&self) -> &SanitizedValue {
        &self.value
    }

    #[must_use]
    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// Every path segment except the last, innermost relation first.
    ///
    /// `user.address.city` yields `["address", "user"]`.
    #[must_use]
    pub fn relation_segments(&self) -> &[String] {
        &self.relation_segments
    }

    /// Final path segment
    #[must_use]
    pub fn leaf_attribute(&self) -> &str {
        &self.leaf_attribute
    }

    /// `filter[<path>][<OP>]` key for the flat encoding
    #[must_use]
    pub fn flat_key(&self) -> String {
        format!("filter[{}][{}]", self.path, self.operator)
    }

    /// Value for the flat encoding: LIKE values get a trailing `%`, lists become a
    /// comma list.
    #[must_use]
    pub fn prepare_for_flat_encoding(&self) -> String {
        self.value.to_flat(self.operator.is_like())
    }

    /// Value for the nested encoding: quoted, LIKE-wildcarded inside the quotes.
    #[must_use]
    pub fn prepare_for_nested_encoding(&self) -> String {
        self.value.to_nested(self.operator.is_like())
    }

    /// `{"<OP>": {"<leaf>": <value>}}` wrapped in one `{"<segment>": ...}` per relation
    #[must_use]
    pub fn nested_fragment(&self) -> String {
        let leaf = format!(
            "{{\"{}\": {{\"{}\": {}}}}}",
            self.operator,
            self.leaf_attribute,
            self.prepare_for_nested_encoding()
        );
        self.relation_segments
            .iter()
            .fold(leaf, |inner, segment| format!("{{\"{segment}\": {inner}}}"))
    }
}
