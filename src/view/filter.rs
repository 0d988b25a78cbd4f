//! Filtered/sorted projection of the collection.

use std::cmp::Ordering;

use crate::{
    types::{SortField, SortOrder},
    user::{QueryParams, UserRecord},
};

/// Derives the filtered/sorted view of `users` under `params`.
///
/// Pure function of its inputs: search narrows by case-insensitive substring
/// over name, email, and the decimal rendering of age; the gender filter is
/// exact; sorting is stable, so ties keep the filtered order. No pagination
/// is applied.
pub fn derive(users: &[UserRecord], params: &QueryParams) -> Vec<UserRecord> {
    let mut out: Vec<UserRecord> = users
        .iter()
        .filter(|user| matches_search(user, params.search.as_deref()))
        .filter(|user| params.gender.is_none_or(|g| user.gender == g))
        .cloned()
        .collect();

    if let Some(field) = params.sort_by {
        out.sort_by(|a, b| compare(a, b, field, params.sort_order));
    }

    out
}

fn matches_search(user: &UserRecord, search: Option<&str>) -> bool {
    let Some(term) = search else { return true };
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    user.name.to_lowercase().contains(&term)
        || user.email.to_lowercase().contains(&term)
        || user.age.to_string().contains(&term)
}

fn compare(a: &UserRecord, b: &UserRecord, field: SortField, order: SortOrder) -> Ordering {
    match field {
        SortField::Id => directed(a.id.cmp(&b.id), order),
        SortField::Name => directed(a.name.cmp(&b.name), order),
        SortField::Email => directed(a.email.cmp(&b.email), order),
        SortField::Age => directed(a.age.cmp(&b.age), order),
        SortField::Gender => directed(a.gender.as_str().cmp(b.gender.as_str()), order),
        SortField::CreatedAt => optional(a.created_at, b.created_at, order),
        SortField::UpdatedAt => optional(a.updated_at, b.updated_at, order),
        SortField::IsActive => optional(a.is_active, b.is_active, order),
    }
}

fn directed(ord: Ordering, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}

/// Absent values sort after present ones in both directions.
fn optional<T: Ord>(a: Option<T>, b: Option<T>, order: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => directed(a.cmp(&b), order),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
