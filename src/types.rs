//! Shared identifier aliases and closed enums.

use serde::{Deserialize, Serialize};

/// Server-assigned user identifier.
pub type UserId = u64;

/// Closed three-value gender enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// "male" on the wire.
    Male,
    /// "female" on the wire.
    Female,
    /// "other" on the wire.
    Other,
}

impl Gender {
    /// Parses raw form text case-insensitively. Returns `None` for anything
    /// outside the three permitted values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Wire label for this value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }
}

/// Record field the filtered view can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    /// Server-assigned identifier.
    Id,
    /// Display name.
    Name,
    /// Email address.
    Email,
    /// Age in years.
    Age,
    /// Gender, compared by its wire label.
    Gender,
    /// Creation timestamp.
    CreatedAt,
    /// Last-update timestamp.
    UpdatedAt,
    /// Active flag.
    IsActive,
}

/// Sort direction for the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending, the default.
    #[default]
    Asc,
    /// Descending; reverses the field comparator.
    Desc,
}

/// Operation kinds tracked by independent loading/error slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// Wholesale collection load.
    Load,
    /// Record creation.
    Create,
    /// Full-record update.
    Update,
    /// Record deletion.
    Delete,
    /// Export of the current view.
    Export,
}
