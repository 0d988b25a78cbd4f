//! Aggregate statistics derived from the full collection.

use serde::{Deserialize, Serialize};

use crate::{types::Gender, user::UserRecord};

/// Inclusive min/max age bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgeRange {
    /// Lowest age present.
    pub min: u32,
    /// Highest age present.
    pub max: u32,
}

/// Aggregates over the full collection, never the filtered view.
///
/// Per-gender counts always sum to `total`; an empty collection reports zeros
/// everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Number of records held.
    pub total: usize,
    /// Records with gender "male".
    pub male_count: usize,
    /// Records with gender "female".
    pub female_count: usize,
    /// Records with gender "other".
    pub other_count: usize,
    /// Integer-rounded arithmetic mean of all ages; zero when empty.
    pub average_age: u32,
    /// Observed age bounds; zeros when empty.
    pub age_range: AgeRange,
}

/// Derives [`Statistics`] in a single pass over `users`.
pub fn derive(users: &[UserRecord]) -> Statistics {
    if users.is_empty() {
        return Statistics::default();
    }

    let mut male_count = 0;
    let mut female_count = 0;
    let mut other_count = 0;
    let mut sum: u64 = 0;
    let mut min = u32::MAX;
    let mut max = 0;

    for user in users {
        match user.gender {
            Gender::Male => male_count += 1,
            Gender::Female => female_count += 1,
            Gender::Other => other_count += 1,
        }
        sum += u64::from(user.age);
        min = min.min(user.age);
        max = max.max(user.age);
    }

    let total = users.len();
    let average_age = (sum as f64 / total as f64).round() as u32;

    Statistics {
        total,
        male_count,
        female_count,
        other_count,
        average_age,
        age_range: AgeRange { min, max },
    }
}
