use proptest::prelude::*;

use roster::{
    types::{Gender, SortField, SortOrder},
    user::{QueryParams, UserRecord},
    view::{filter, stats},
};

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::Other),
    ]
}

fn sort_field_strategy() -> impl Strategy<Value = SortField> {
    prop_oneof![
        Just(SortField::Id),
        Just(SortField::Name),
        Just(SortField::Email),
        Just(SortField::Age),
        Just(SortField::Gender),
        Just(SortField::CreatedAt),
        Just(SortField::UpdatedAt),
        Just(SortField::IsActive),
    ]
}

fn collection_strategy() -> impl Strategy<Value = Vec<UserRecord>> {
    prop::collection::vec(
        (
            "[A-Za-z]{2,12}",
            "[a-z]{2,8}",
            1u32..150,
            gender_strategy(),
            prop::option::of(any::<bool>()),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(idx, (name, domain, age, gender, is_active))| UserRecord {
                id: idx as u64 + 1,
                email: format!("{}@{domain}.com", name.to_lowercase()),
                name,
                age,
                gender,
                created_at: None,
                updated_at: None,
                is_active,
            })
            .collect()
    })
}

fn params_strategy() -> impl Strategy<Value = QueryParams> {
    (
        prop::option::of("[a-z0-9]{0,3}"),
        prop::option::of(gender_strategy()),
        prop::option::of(sort_field_strategy()),
        prop_oneof![Just(SortOrder::Asc), Just(SortOrder::Desc)],
    )
        .prop_map(|(search, gender, sort_by, sort_order)| QueryParams {
            search,
            gender,
            sort_by,
            sort_order,
        })
}

proptest! {
    #[test]
    fn gender_counts_always_sum_to_total(users in collection_strategy()) {
        let s = stats::derive(&users);
        prop_assert_eq!(s.male_count + s.female_count + s.other_count, s.total);
        prop_assert_eq!(s.total, users.len());

        if users.is_empty() {
            prop_assert_eq!(s.average_age, 0);
            prop_assert_eq!((s.age_range.min, s.age_range.max), (0, 0));
        } else {
            prop_assert!(s.age_range.min <= s.age_range.max);
            prop_assert!(s.average_age >= s.age_range.min);
            prop_assert!(s.average_age <= s.age_range.max);
        }
    }

    #[test]
    fn derivation_is_a_pure_function_of_its_inputs(
        users in collection_strategy(),
        params in params_strategy(),
    ) {
        let once = filter::derive(&users, &params);
        let twice = filter::derive(&users, &params);
        prop_assert_eq!(&once, &twice);

        // Re-deriving from the view itself is a fixed point: the filters
        // already hold and the stable sort leaves order unchanged.
        prop_assert_eq!(filter::derive(&once, &params), once);
    }

    #[test]
    fn view_is_an_ordered_subset_without_duplicates(
        users in collection_strategy(),
        params in params_strategy(),
    ) {
        let view = filter::derive(&users, &params);

        for record in &view {
            prop_assert!(users.contains(record));
        }

        let mut ids: Vec<u64> = view.iter().map(|u| u.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), view.len());

        // Without a sort field, relative collection order is preserved.
        if params.sort_by.is_none() {
            let positions: Vec<usize> = view
                .iter()
                .map(|v| users.iter().position(|u| u.id == v.id).expect("present"))
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn gender_filter_keeps_only_that_gender(
        users in collection_strategy(),
        gender in gender_strategy(),
    ) {
        let params = QueryParams { gender: Some(gender), ..QueryParams::default() };
        let view = filter::derive(&users, &params);
        prop_assert!(view.iter().all(|u| u.gender == gender));

        let expected = users.iter().filter(|u| u.gender == gender).count();
        prop_assert_eq!(view.len(), expected);
    }
}
