//! User domain records, drafts, and query parameters.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Gender, SortField, SortOrder, UserId};

/// Fully materialized, authoritative user record.
///
/// The identifier is assigned by the remote service and immutable afterwards;
/// updates replace every other field as a whole. Absence of an identifier
/// before creation is modeled by [`UserDraft`], which has no id field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Stable server-assigned identifier.
    pub id: UserId,
    /// Non-empty display name.
    pub name: String,
    /// Email address, syntactically validated upstream.
    pub email: String,
    /// Age in years, positive.
    pub age: u32,
    /// One of the three permitted gender values.
    pub gender: Gender,
    /// Creation timestamp, set server-side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last-update timestamp, refreshed server-side on every update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Active flag.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Form input used to create or update a record.
///
/// Gender arrives as raw text; the store performs the set-membership guard
/// before any network round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserDraft {
    /// Entered display name.
    pub name: String,
    /// Entered email address.
    pub email: String,
    /// Entered age in years.
    pub age: u32,
    /// Entered gender text; must parse to a [`Gender`] value.
    pub gender: String,
}

/// Active search/filter/sort configuration for the filtered view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Free-text search over name, email, and the decimal rendering of age.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Exact gender filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Field to sort the filtered view on; unset keeps collection order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortField>,
    /// Sort direction; ascending by default.
    #[serde(default)]
    pub sort_order: SortOrder,
}

/// Sparse merge into [`QueryParams`] where each outer `Some` overwrites the
/// current value and `None` retains it. The inner `Option` may clear an
/// optional field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryPatch {
    /// Optional replacement for the search string.
    pub search: Option<Option<String>>,
    /// Optional replacement for the gender filter.
    pub gender: Option<Option<Gender>>,
    /// Optional replacement for the sort field.
    pub sort_by: Option<Option<SortField>>,
    /// Optional replacement for the sort direction.
    pub sort_order: Option<SortOrder>,
}

impl QueryPatch {
    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merges this patch in place into `params`.
    pub fn apply_to(&self, params: &mut QueryParams) {
        if let Some(v) = &self.search {
            params.search = v.clone();
        }
        if let Some(v) = self.gender {
            params.gender = v;
        }
        if let Some(v) = self.sort_by {
            params.sort_by = v;
        }
        if let Some(v) = self.sort_order {
            params.sort_order = v;
        }
    }
}
