//! Listing filters.
//!
//! A [`Filter`] is plain data: it is serialized into the `/list-files` body
//! as-is and evaluated by the backend. Leaves compare `uploadedAt`, a path
//! key or a metadata key; `AND`/`OR` nest sub-filters.
//!
//! ```rust
//! use edgestore_client::{Comparison, Filter};
//!
//! let filter = Filter::any([
//!     Filter::new().path("type", Comparison::equals("avatar")),
//!     Filter::new().metadata("owner", Comparison::starts_with("team-")),
//! ]);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Recursive filter expression
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Filter {
    #[serde(rename = "AND", default, skip_serializing_if = "Vec::is_empty")]
    pub and: Vec<Filter>,
    #[serde(rename = "OR", default, skip_serializing_if = "Vec::is_empty")]
    pub or: Vec<Filter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<Comparison<DateTime<Utc>>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub path: BTreeMap<String, Comparison>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Comparison>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sub-filter must match
    pub fn all(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self {
            and: filters.into_iter().collect(),
            ..Default::default()
        }
    }

    /// At least one sub-filter must match
    pub fn any(filters: impl IntoIterator<Item = Filter>) -> Self {
        Self {
            or: filters.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn uploaded_at(mut self, comparison: Comparison<DateTime<Utc>>) -> Self {
        self.uploaded_at = Some(comparison);
        self
    }

    pub fn path(mut self, key: impl Into<String>, comparison: Comparison) -> Self {
        self.path.insert(key.into(), comparison);
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, comparison: Comparison) -> Self {
        self.metadata.insert(key.into(), comparison);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.and.is_empty()
            && self.or.is_empty()
            && self.uploaded_at.is_none()
            && self.path.is_empty()
            && self.metadata.is_empty()
    }
}

/// Leaf comparison. Set operators are combined by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Comparison<T = String> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neq: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gt: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lt: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_with: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ends_with: Option<T>,
    /// Inclusive `[low, high]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub between: Option<(T, T)>,
}

impl<T> Default for Comparison<T> {
    fn default() -> Self {
        Self {
            eq: None,
            neq: None,
            gt: None,
            gte: None,
            lt: None,
            lte: None,
            starts_with: None,
            ends_with: None,
            between: None,
        }
    }
}

impl<T> Comparison<T> {
    pub fn equals(value: impl Into<T>) -> Self {
        Self {
            eq: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn not_equals(value: impl Into<T>) -> Self {
        Self {
            neq: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn greater_than(value: impl Into<T>) -> Self {
        Self {
            gt: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn at_least(value: impl Into<T>) -> Self {
        Self {
            gte: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn less_than(value: impl Into<T>) -> Self {
        Self {
            lt: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn at_most(value: impl Into<T>) -> Self {
        Self {
            lte: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn starts_with(value: impl Into<T>) -> Self {
        Self {
            starts_with: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn ends_with(value: impl Into<T>) -> Self {
        Self {
            ends_with: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn between(low: impl Into<T>, high: impl Into<T>) -> Self {
        Self {
            between: Some((low.into(), high.into())),
            ..Default::default()
        }
    }
}
