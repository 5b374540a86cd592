// Criterion benchmarks for the gift matcher

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gift_match::core::{normalize_term, parse_list, set_matches, Matcher};
use gift_match::models::{Gift, GiftCriteria, UserProfile};
use uuid::Uuid;

fn create_gift(id: usize) -> Gift {
    // Mix of constrained and unconstrained entries
    let criteria = match id % 4 {
        0 => GiftCriteria::default(),
        1 => GiftCriteria {
            genders: vec!["female".to_string()],
            age_min: Some(18),
            age_max: Some(35),
            ..GiftCriteria::default()
        },
        2 => GiftCriteria {
            nationalities: vec!["japanese".to_string(), "american".to_string()],
            jobs: vec!["engineer".to_string()],
            ..GiftCriteria::default()
        },
        _ => GiftCriteria {
            genders: vec!["male".to_string(), "female".to_string()],
            age_min: Some((20 + id % 50) as u8),
            age_max: None,
            nationalities: vec!["german".to_string()],
            jobs: vec![],
        },
    };

    Gift {
        id: Uuid::new_v4(),
        name: format!("Gift {}", id),
        description: format!("Description for gift {}", id),
        price: 10.0 + id as f64,
        image: None,
        criteria,
        created_at: None,
    }
}

fn create_profile() -> UserProfile {
    UserProfile {
        sex: "female".to_string(),
        age: Some(30),
        nationality: "American".to_string(),
        job: "Engineer".to_string(),
    }
}

fn bench_normalize_term(c: &mut Criterion) {
    c.bench_function("normalize_term", |b| {
        b.iter(|| normalize_term(black_box("  Software Engineer  ")));
    });
}

fn bench_parse_list(c: &mut Criterion) {
    c.bench_function("parse_list", |b| {
        b.iter(|| parse_list(black_box("Male, Female , ,Other,JAPANESE")));
    });
}

fn bench_set_matches(c: &mut Criterion) {
    let nationalities = vec![
        "japanese".to_string(),
        "american".to_string(),
        "german".to_string(),
    ];

    c.bench_function("set_matches", |b| {
        b.iter(|| set_matches(black_box(" American "), black_box(&nationalities)));
    });
}

fn bench_suggest(c: &mut Criterion) {
    let matcher = Matcher::new();
    let profile = create_profile();

    let mut group = c.benchmark_group("suggest");

    for catalog_size in [10, 50, 100, 500, 1000].iter() {
        let catalog: Vec<Gift> = (0..*catalog_size).map(create_gift).collect();

        group.bench_with_input(
            BenchmarkId::new("suggest", catalog_size),
            catalog_size,
            |b, _| {
                b.iter(|| matcher.suggest(black_box(&profile), black_box(catalog.clone())));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_normalize_term,
    bench_parse_list,
    bench_set_matches,
    bench_suggest
);

criterion_main!(benches);
