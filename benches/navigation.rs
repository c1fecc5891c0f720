//! Benchmarks for visible-set derivation and viewer navigation.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use showreel::catalog::Catalog;
use showreel::gallery::{FilterState, visible_set};
use showreel::viewer::{Direction, ViewerState};

fn synthetic_catalog(count: usize) -> Catalog {
    let categories = ["film", "wedding", "travel", "documentary"];
    let items: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"id": {i}, "title": "Project {i}", "category": "{}",
                    "description": "Footage reel number {i}.",
                    "thumbnailUrl": "thumbs/{i}.jpg", "videoUrl": "v{i}"}}"#,
                categories[i % categories.len()]
            )
        })
        .collect();
    let json = format!(
        r#"{{"categories": ["film", "wedding", "travel", "documentary"],
            "items": [{}]}}"#,
        items.join(",")
    );
    Catalog::from_json(&json, "bench.json".into()).unwrap()
}

fn bench_visible_set(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);

    let category_only = FilterState {
        category: "wedding".to_string(),
        ..FilterState::default()
    };
    c.bench_function("visible_set_10k_category", |b| {
        b.iter(|| visible_set(black_box(&catalog), black_box(&category_only)))
    });

    let with_search = FilterState {
        category: "wedding".to_string(),
        search_term: "reel number 42".to_string(),
    };
    c.bench_function("visible_set_10k_search", |b| {
        b.iter(|| visible_set(black_box(&catalog), black_box(&with_search)))
    });
}

fn bench_navigate_full_loop(c: &mut Criterion) {
    let catalog = synthetic_catalog(10_000);
    let visible = visible_set(&catalog, &FilterState::default());

    c.bench_function("navigate_10k_wrap_around", |b| {
        b.iter(|| {
            let mut viewer = ViewerState::closed();
            viewer.open(&visible, visible[0]);
            for _ in 0..visible.len() {
                viewer.navigate(Direction::Next, black_box(&visible));
            }
            viewer.open_id()
        })
    });
}

criterion_group!(benches, bench_visible_set, bench_navigate_full_loop);
criterion_main!(benches);
