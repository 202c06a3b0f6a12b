use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ontime::parser::parse_time;

fn bench_parse_time(c: &mut Criterion) {
    let inputs = ["2:30pm", "12am", "14:30", "9", "abc", "13pm"];

    c.bench_function("parse_time mixed shapes", |b| {
        b.iter(|| {
            for input in inputs {
                let _ = parse_time(black_box(input));
            }
        })
    });
}

criterion_group!(benches, bench_parse_time);
criterion_main!(benches);
