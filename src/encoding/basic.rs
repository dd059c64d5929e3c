use tracing::trace;

use crate::filtering::{FilterCollection, SortSpec, join_names, sorting_params};
use crate::models::BasicQueryParameters;
use crate::params::QueryParams;

/// Flat CRNK filter encoder.
///
/// Emits, in this order and only when non-empty: `include`, one
/// `filter[<path>][<OP>]` per valid filter, `fields`, `sort`. Dotted paths are sent as-is;
/// the backend resolves the relations itself.
///
/// # Example
/// ```
/// use crnk_query::{BasicFilter, FilterOperator, FilterSpec, SortSpec};
///
/// let mut filter = BasicFilter::new(FilterSpec::new("user.name", "Auto", FilterOperator::Like))
///     .include(["user"]);
/// filter.sort_by([SortSpec::desc("user.name")]);
///
/// assert_eq!(
///     filter.http_params().to_string(),
///     "include=user&filter[user.name][LIKE]=Auto%&sort=-user.name"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicFilter {
    filters: FilterCollection,
    included_resources: Option<String>,
    sparse_fieldsets: Option<String>,
    sort: Option<String>,
}

impl BasicFilter {
    pub fn new(filters: impl Into<FilterCollection>) -> Self {
        Self {
            filters: filters.into(),
            ..Self::default()
        }
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

    /// Replace the sort order. Specs with blank paths are skipped; if none remain, no
    /// `sort` parameter is emitted.
    pub fn sort_by(&mut self, sort_specs: impl IntoIterator<Item = SortSpec>) {
        let specs: Vec<SortSpec> = sort_specs.into_iter().collect();
        self.sort = sorting_params(&specs);
    }

    /// Whether at least one filter survived validation.
    #[must_use]
    pub fn is_any_filter(&self) -> bool {
        !self.filters.is_empty()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterCollection {
        &self.filters
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

        for filter in &self.filters {
            params = params.set(filter.flat_key(), filter.prepare_for_flat_encoding());
        }

        if let Some(fields) = &self.sparse_fieldsets {
            params = params.set("fields", fields);
        }

        if let Some(sort) = &self.sort {
            params = params.set("sort", sort);
        }

        trace!(filters = self.filters.len(), params = params.len(), "Built basic filter parameters");
        params
    }
}

impl From<BasicQueryParameters> for BasicFilter {
    fn from(parameters: BasicQueryParameters) -> Self {
        let mut filter = Self::new(parameters.filter_specs)
            .include(&parameters.related_resources)
            .fields(&parameters.sparse_fieldsets);
        filter.sort_by(parameters.sort);
        filter
    }
}

/// Encode `parameters` with the flat filter style.
#[must_use]
pub fn encode(parameters: &BasicQueryParameters) -> QueryParams {
    BasicFilter::from(parameters.clone()).http_params()
}
