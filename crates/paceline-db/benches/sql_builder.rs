use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use paceline_db::qb::{FilteredSelect, Page, PartialUpdate};

/// Build a partial update touching `n` columns.
fn build_partial_update(n: usize) -> PartialUpdate {
    let mut qb = PartialUpdate::new("activities", "id");
    for i in 0..n {
        qb = qb.set(&format!("col{i}"), i as i64);
    }
    qb
}

fn bench_partial_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("qb/partial_update");

    for n in [1, 3, 7, 20] {
        let qb = build_partial_update(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.build("row-id")));
        });
    }

    group.finish();
}

fn bench_filtered_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("qb/filtered_select");

    for n in [0, 2, 5] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut qb = FilteredSelect::new("activities");
                for i in 0..n {
                    qb = qb.gte(&format!("col{i}"), i as i64);
                }
                black_box(qb.order_by("created_at").page(Page::default()).build());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_partial_update, bench_filtered_select);
criterion_main!(benches);
