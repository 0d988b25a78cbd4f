use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use roster::{
    types::{Gender, SortField, SortOrder},
    user::{QueryParams, UserRecord},
    view::{filter, stats},
};

fn record(id: u64) -> UserRecord {
    let gender = match id % 3 {
        0 => Gender::Male,
        1 => Gender::Female,
        _ => Gender::Other,
    };
    UserRecord {
        id,
        name: format!("User {id}"),
        email: format!("user{id}@example.com"),
        age: 18 + (id % 60) as u32,
        gender,
        created_at: None,
        updated_at: None,
        is_active: Some(id % 4 != 0),
    }
}

fn collection(n: u64) -> Vec<UserRecord> {
    (1..=n).map(record).collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_derive");
    let params = QueryParams {
        search: Some("user1".to_string()),
        gender: Some(Gender::Female),
        sort_by: Some(SortField::Age),
        sort_order: SortOrder::Desc,
    };

    for n in [1_000u64, 10_000u64, 50_000u64] {
        let users = collection(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &users, |b, users| {
            b.iter(|| {
                let _ = filter::derive(users, &params);
            });
        });
    }

    group.finish();
}

fn bench_sort_only(c: &mut Criterion) {
    let users = collection(10_000);
    let params = QueryParams {
        sort_by: Some(SortField::Name),
        ..QueryParams::default()
    };

    c.bench_function("sort_by_name_10k", |b| {
        b.iter(|| {
            let _ = filter::derive(&users, &params);
        });
    });
}

fn bench_statistics(c: &mut Criterion) {
    let users = collection(50_000);

    c.bench_function("statistics_50k", |b| {
        b.iter(|| {
            let _ = stats::derive(&users);
        });
    });
}

criterion_group!(benches, bench_filter, bench_sort_only, bench_statistics);
criterion_main!(benches);
