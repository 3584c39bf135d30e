// benches/parse.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use movie_trends::config::consts::PAGE_URL;
use movie_trends::core::normalize;
use movie_trends::specs::moviemeter;

fn load_sample() -> String {
    std::fs::read_to_string("tests/fixtures/moviemeter.html")
        .expect("read tests/fixtures/moviemeter.html")
}

fn bench_parse(c: &mut Criterion) {
    let doc = load_sample();

    c.bench_function("moviemeter_parse_page", |b| {
        b.iter(|| {
            let rows = moviemeter::parse_page(black_box(&doc), PAGE_URL).expect("selectors compile");
            black_box(rows.len())
        })
    });

    c.bench_function("moviemeter_count_items", |b| {
        b.iter(|| black_box(moviemeter::count_items(black_box(&doc)).expect("selectors compile")))
    });

    let votes = ["1.2M", "850K", "12,345", "(N/A)", "1200000"];
    c.bench_function("normalize_vote_count", |b| {
        b.iter(|| {
            for v in votes {
                black_box(normalize::vote_count(black_box(v)));
            }
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
