use serde::{Deserialize, Serialize};
use serde_with::{OneOrMany, serde_as};

use crate::filtering::{FilterSpec, NestingOperator, SortSpec};

/// Input of the flat (`filter[path][OP]=value`) encoder.
///
/// Every list field also accepts a single value when deserialized, so a configuration
/// may say `"related_resources": "user"` or `"related_resources": ["user", "car"]`.
///
/// # Example
/// ```
/// use crnk_query::BasicQueryParameters;
///
/// let params: BasicQueryParameters = serde_json::from_str(r#"{
///     "filter_specs": {"path": "user.name", "value": "Auto", "operator": "LIKE"},
///     "related_resources": "user"
/// }"#).unwrap();
/// assert_eq!(params.filter_specs.len(), 1);
/// ```
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicQueryParameters {
    #[serde_as(as = "OneOrMany<_>")]
    pub filter_specs: Vec<FilterSpec>,
    /// Names for the `include` parameter
    #[serde_as(as = "OneOrMany<_>")]
    pub related_resources: Vec<String>,
    /// Names for the `fields` parameter
    #[serde_as(as = "OneOrMany<_>")]
    pub sparse_fieldsets: Vec<String>,
    #[serde_as(as = "OneOrMany<_>")]
    pub sort: Vec<SortSpec>,
}

/// Input of the nested (`filter={"AND": [...]}`) encoder.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestedQueryParameters {
    #[serde_as(as = "OneOrMany<_>")]
    pub filter_specs: Vec<FilterSpec>,
    /// Boolean operator wrapping the filters when more than one fragment is present
    pub nesting_condition: NestingOperator,
    /// Previously built nested filter strings, appended as extra fragments
    #[serde_as(as = "OneOrMany<_>")]
    pub inner_nested_filter: Vec<String>,
    #[serde_as(as = "OneOrMany<_>")]
    pub related_resources: Vec<String>,
    #[serde_as(as = "OneOrMany<_>")]
    pub sparse_fieldsets: Vec<String>,
    #[serde_as(as = "OneOrMany<_>")]
    pub sort: Vec<SortSpec>,
}
