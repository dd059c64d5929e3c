//! Nested CRNK filter encoding.
//!
//! All conditions travel in a single `filter` parameter holding a JSON-like expression:
//!
//! ```text
//! {"AND": [{"user": {"GE": {"number": "30000"}}}, {"user": {"LIKE": {"name": "Emil%"}}}]}
//! ```
//!
//! Each filter becomes `{"<OP>": {"<leaf>": <value>}}`, wrapped in one
//! `{"<relation>": ...}` object per relation on its path. Fragments are combined under the
//! nesting condition only when more than one is present; a lone fragment is sent as-is.

use std::fmt;

use tracing::trace;

use crate::filtering::{
    FilterCollection, NestingOperator, SortSpec, ValidFilter, join_names, sorting_params,
};
use crate::models::NestedQueryParameters;
use crate::params::QueryParams;

/// One node of a nested filter expression.
///
/// `Display` renders the wire form.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterNode {
    Leaf(ValidFilter),
    /// Previously built filter string, passed through verbatim
    Fragment(String),
    Group {
        condition: NestingOperator,
        children: Vec<FilterNode>,
    },
}

impl FilterNode {
    pub fn group(condition: NestingOperator, children: impl IntoIterator<Item = FilterNode>) -> Self {
        Self::Group {
            condition,
            children: children.into_iter().collect(),
        }
    }

    /// Whether this node renders to nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Leaf(_) => false,
            Self::Fragment(fragment) => fragment.trim().is_empty(),
            Self::Group { children, .. } => children.iter().all(FilterNode::is_empty),
        }
    }
}

impl fmt::Display for FilterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(filter) => f.write_str(&filter.nested_fragment()),
            Self::Fragment(fragment) => f.write_str(fragment),
            Self::Group {
                condition,
                children,
            } => {
                let children: Vec<&FilterNode> =
                    children.iter().filter(|child| !child.is_empty()).collect();
                match children.as_slice() {
                    [] => Ok(()),
                    [single] => write!(f, "{single}"),
                    _ => {
                        write!(f, "{{\"{condition}\": [")?;
                        for (index, child) in children.iter().enumerate() {
                            if index > 0 {
                                f.write_str(", ")?;
                            }
                            write!(f, "{child}")?;
                        }
                        f.write_str("]}")
                    }
                }
            }
        }
    }
}

impl From<ValidFilter> for FilterNode {
    fn from(filter: ValidFilter) -> Self {
        Self::Leaf(filter)
    }
}

impl From<String> for FilterNode {
    fn from(fragment: String) -> Self {
        Self::Fragment(fragment)
    }
}

impl From<&str> for FilterNode {
    fn from(fragment: &str) -> Self {
        Self::Fragment(fragment.to_string())
    }
}

impl From<&NestedFilter> for FilterNode {
    fn from(filter: &NestedFilter) -> Self {
        filter.filter_tree()
    }
}

/// Nested CRNK filter encoder.
///
/// Emits, in this order and only when non-empty: `include`, `filter`, `fields`, `sort`.
///
/// # Example
/// ```
/// use crnk_query::{FilterOperator, FilterSpec, NestedFilter, NestingOperator};
///
/// let users = NestedFilter::new([
///     FilterSpec::new("user.number", "30000", FilterOperator::Ge),
///     FilterSpec::new("user.name", "Emil", FilterOperator::Like),
/// ]);
/// let clients = NestedFilter::new(FilterSpec::equals("client.id", "16512"))
///     .with_nesting_condition(NestingOperator::Or)
///     .with_inner_filter(&users);
///
/// assert_eq!(
///     clients.build_filter_string(),
///     r#"{"OR": [{"client": {"EQ": {"id": "16512"}}}, {"AND": [{"user": {"GE": {"number": "30000"}}}, {"user": {"LIKE": {"name": "Emil%"}}}]}]}"#
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedFilter {
    filters: FilterCollection,
    nesting_condition: NestingOperator,
    inner_filters: Vec<FilterNode>,
    included_resources: Option<String>,
    sparse_fieldsets: Option<String>,
    sort: Option<String>,
}

impl NestedFilter {
    pub fn new(filters: impl Into<FilterCollection>) -> Self {
        Self {
            filters: filters.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_nesting_condition(mut self, nesting_condition: NestingOperator) -> Self {
        self.nesting_condition = nesting_condition;
        self
    }

    /// Add an already nested filter as an extra fragment after the own filters.
    ///
    /// Blank fragments are ignored.
    #[must_use]
    pub fn with_inner_filter(mut self, inner: impl Into<FilterNode>) -> Self {
        let inner = inner.into();
        if !inner.is_empty() {
            self.inner_filters.push(inner);
        }
        self
    }

    /// Related resources for the `include` parameter; blank names are skipped.
    #[must_use]
    pub fn include<S: AsRef<str>>(mut self, related_resources: impl IntoIterator<Item = S>) -> Self {
        self.included_resources = join_names(related_resources);
        self
    }

    /// Sparse fieldsets for the `fields` parameter; blank names are skipped.
    #[must_use]
    pub fn fields<S: AsRef<str>>(mut self, sparse_fieldsets: impl IntoIterator<Item = S>) -> Self {
        self.sparse_fieldsets = join_names(sparse_fieldsets);
        self
    }

    /// Replace the sort order. Specs with blank paths are skipped.
    pub fn sort_by(&mut self, sort_specs: impl IntoIterator<Item = SortSpec>) {
        let specs: Vec<SortSpec> = sort_specs.into_iter().collect();
        self.sort = sorting_params(&specs);
    }

    /// Whether at least one own filter survived validation. Inner filters do not count.
    #[must_use]
    pub fn is_any_filter(&self) -> bool {
        !self.filters.is_empty()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterCollection {
        &self.filters
    }

    #[must_use]
    pub fn nesting_condition(&self) -> NestingOperator {
        self.nesting_condition
    }

    /// Expression tree: own filters first, then inner filters, under the nesting condition.
    #[must_use]
    pub fn filter_tree(&self) -> FilterNode {
        let children = self
            .filters
            .iter()
            .cloned()
            .map(FilterNode::Leaf)
            .chain(self.inner_filters.iter().cloned());
        FilterNode::group(self.nesting_condition, children)
    }

    /// Value of the `filter` parameter, empty when there is nothing to filter on.
    #[must_use]
    pub fn build_filter_string(&self) -> String {
        self.filter_tree().to_string()
    }

    #[must_use]
    pub fn http_params(&self) -> QueryParams {
        self.set_http_params(QueryParams::new())
    }

    /// Add this filter's parameters to `params`.
    #[must_use]
    pub fn set_http_params(&self, mut params: QueryParams) -> QueryParams {
        if let Some(included) = &self.included_resources {
            params = params.set("include", included);
        }

        let filter = self.build_filter_string();
        if !filter.is_empty() {
            params = params.set("filter", filter);
        }

        if let Some(fields) = &self.sparse_fieldsets {
            params = params.set("fields", fields);
        }

        if let Some(sort) = &self.sort {
            params = params.set("sort", sort);
        }

        trace!(
            filters = self.filters.len(),
            inner_filters = self.inner_filters.len(),
            condition = %self.nesting_condition,
            "Built nested filter parameters"
        );
        params
    }
}

impl From<NestedQueryParameters> for NestedFilter {
    fn from(parameters: NestedQueryParameters) -> Self {
        let mut filter = parameters.inner_nested_filter.into_iter().fold(
            Self::new(parameters.filter_specs).with_nesting_condition(parameters.nesting_condition),
            |filter, inner| filter.with_inner_filter(inner),
        );
        filter = filter
            .include(&parameters.related_resources)
            .fields(&parameters.sparse_fieldsets);
        filter.sort_by(parameters.sort);
        filter
    }
}

/// Combine `filters` and an optional previously built filter string under `condition`.
///
/// Returns an empty string when no valid filter and no inner filter is left.
pub fn build_filter_string(
    filters: impl Into<FilterCollection>,
    condition: NestingOperator,
    inner_filter: Option<&str>,
) -> String {
    let mut filter = NestedFilter::new(filters).with_nesting_condition(condition);
    if let Some(inner) = inner_filter {
        filter = filter.with_inner_filter(inner);
    }
    filter.build_filter_string()
}

/// Encode `parameters` with the nested filter style.
#[must_use]
pub fn encode(parameters: &NestedQueryParameters) -> QueryParams {
    NestedFilter::from(parameters.clone()).http_params()
}
