//! cargo bench --bench compile
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use remata::{Pattern, SyntaxFlags};

pub fn criterion_benchmark(c: &mut Criterion) {
    let source = "(ab|cd|ef|gh)*x{2,5}[a-m]+";

    c.bench_function("parse", |b| {
        b.iter(|| Pattern::new(black_box(source)).unwrap())
    });

    c.bench_function("parse_core_only", |b| {
        b.iter(|| Pattern::with_flags(black_box(source), SyntaxFlags::empty()).unwrap())
    });

    {
        let pattern = Pattern::new(source).unwrap();
        c.bench_function("compile", |b| b.iter(|| pattern.compile().call().unwrap()));
    }

    {
        let pattern = Pattern::new("[a-z]*&~(@\"ab\"@)").unwrap();
        c.bench_function("compile_intersection_complement", |b| {
            b.iter(|| pattern.compile().call().unwrap())
        });
    }

    {
        let pattern = Pattern::new("<1-65535>").unwrap();
        c.bench_function("compile_interval", |b| {
            b.iter(|| pattern.compile().call().unwrap())
        });
    }

    {
        let automaton = Pattern::new("(ab|cd|ef|gh)*x{2,5}[a-m]+")
            .unwrap()
            .compile()
            .call()
            .unwrap();
        assert!(automaton.accepts("abcdxxm"));
        c.bench_function("accepts", |b| {
            b.iter(|| automaton.accepts(black_box("abcdefghxxxxabcdefm")))
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
