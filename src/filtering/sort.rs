use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort direction. Anything that is not `asc` (case-insensitive) sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Convert a direction string to `SortDirection`
fn parse_direction(direction: &str) -> SortDirection {
    if direction.trim().eq_ignore_ascii_case("asc") {
        SortDirection::Asc
    } else {
        SortDirection::Desc
    }
}

impl From<&str> for SortDirection {
    fn from(direction: &str) -> Self {
        parse_direction(direction)
    }
}

impl From<String> for SortDirection {
    fn from(direction: String) -> Self {
        parse_direction(&direction)
    }
}

impl From<SortDirection> for String {
    fn from(direction: SortDirection) -> Self {
        direction.to_string()
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        })
    }
}

/// Sort on one (possibly dotted) attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub path: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(path: impl Into<String>, direction: impl Into<SortDirection>) -> Self {
        Self {
            path: path.into(),
            direction: direction.into(),
        }
    }

    pub fn asc(path: impl Into<String>) -> Self {
        Self::new(path, SortDirection::Asc)
    }

    pub fn desc(path: impl Into<String>) -> Self {
        Self::new(path, SortDirection::Desc)
    }

    /// `path` for ascending, `-path` for descending, `None` for a blank path.
    #[must_use]
    pub fn sort_param(&self) -> Option<String> {
        let path = self.path.trim();
        if path.is_empty() {
            return None;
        }
        Some(match self.direction {
            SortDirection::Asc => path.to_string(),
            SortDirection::Desc => format!("-{path}"),
        })
    }
}

/// Join the sort tokens of `specs` with `,`, skipping blank paths.
///
/// Returns `None` when no token remains, in which case no `sort` parameter is emitted.
pub fn sorting_params<'a>(specs: impl IntoIterator<Item = &'a SortSpec>) -> Option<String> {
    let tokens: Vec<String> = specs.into_iter().filter_map(SortSpec::sort_param).collect();
    (!tokens.is_empty()).then(|| tokens.join(","))
}
