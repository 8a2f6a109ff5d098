use std::collections::HashSet;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use loomscript_core::{compile, lexer::Lexer, parser::Parser};

fn make_script(lines: usize) -> String {
    let mut buf = String::with_capacity(lines * 40);

    for i in 0..lines {
        match i % 6 {
            0 => buf.push_str(&format!("# Scene {i}\n")),
            1 => buf.push_str(&format!("Description: Somewhere number {i}\n")),
            2 => buf.push_str(&format!("Character: c{} - Enters Left - 2nd Dialogue - Delay 100ms\n", i % 50)),
            3 => buf.push_str(&format!("Dialogue: Hello world {i}\n")),
            4 => buf.push_str(&format!("Choice: Onward → Scene {}\n", i + 2)),
            5 => buf.push_str("// comment\n"),
            _ => unreachable!(),
        }
    }

    buf
}

fn bench_full(c: &mut Criterion) {
    let src = make_script(10_000);
    let known: HashSet<String> = HashSet::new();
    let mut group = c.benchmark_group("parse");
    group.sample_size(10);
    group.bench_function("lex+parse 10k lines", |b| {
        b.iter(|| {
            let lines = Lexer::new(black_box(&src)).run();
            let _draft = Parser::new(black_box(&lines)).parse();
        })
    });
    group.bench_function("compile 10k lines", |b| {
        b.iter(|| compile(black_box(&src), &known))
    });
    group.finish();
}

criterion_group!(benches, bench_full);
criterion_main!(benches);
