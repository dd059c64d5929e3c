use tracing::debug;

use super::spec::{FilterSpec, ValidFilter};

/// Ordered set of filters that passed validation.
///
/// This is the single gate every encoder reads from: invalid specs are dropped here,
/// the rest keep their relative order. Duplicate paths are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCollection {
    filters: Vec<ValidFilter>,
}

impl FilterCollection {
    pub fn new(specs: impl IntoIterator<Item = FilterSpec>) -> Self {
        specs.into_iter().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidFilter> {
        self.filters.iter()
    }
}

/// Validate `specs`, returning only the ones that survive, in their original order.
#[must_use]
pub fn filter_array(specs: &[FilterSpec]) -> Vec<ValidFilter> {
    specs.iter().filter_map(validate_or_log).collect()
}

fn validate_or_log(spec: &FilterSpec) -> Option<ValidFilter> {
    let valid = spec.validate();
    if valid.is_none() {
        debug!(path = %spec.path, operator = %spec.operator, "Dropping invalid filter");
    }
    valid
}

impl FromIterator<FilterSpec> for FilterCollection {
    fn from_iter<I: IntoIterator<Item = FilterSpec>>(iter: I) -> Self {
        Self {
            filters: iter
                .into_iter()
                .filter_map(|spec| validate_or_log(&spec))
                .collect(),
        }
    }
}

impl From<FilterSpec> for FilterCollection {
    fn from(spec: FilterSpec) -> Self {
        Self::new([spec])
    }
}

impl From<Vec<FilterSpec>> for FilterCollection {
    fn from(specs: Vec<FilterSpec>) -> Self {
        Self::new(specs)
    }
}

impl From<&[FilterSpec]> for FilterCollection {
    fn from(specs: &[FilterSpec]) -> Self {
        Self {
            filters: filter_array(specs),
        }
    }
}

impl<const N: usize> From<[FilterSpec; N]> for FilterCollection {
    fn from(specs: [FilterSpec; N]) -> Self {
        Self::new(specs)
    }
}

impl<'a> IntoIterator for &'a FilterCollection {
    type Item = &'a ValidFilter;
    type IntoIter = std::slice::Iter<'a, ValidFilter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}
