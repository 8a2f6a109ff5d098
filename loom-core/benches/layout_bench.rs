use std::collections::HashSet;
use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use loom_core::animation::create_runtime;
use loom_core::layout::layout;
use loomscript_core::compile;

fn make_story(scenes: usize) -> String {
    let mut buf = String::with_capacity(scenes * 80);
    for i in 0..scenes {
        buf.push_str(&format!("# S{i}\n"));
        buf.push_str(&format!("Character: c{} - {} Dialogue\n", i % 20, ["1st", "2nd", "3rd"][i % 3]));
        buf.push_str(&format!("Dialogue: line {i}\nDialogue: more {i}\nDialogue: end {i}\n"));
        buf.push_str(&format!("Choice: next -> S{}\n", i + 1));
        buf.push_str(&format!("Choice: skip -> S{}\n", (i * 7 + 3) % scenes));
    }
    buf
}

fn bench_layout(c: &mut Criterion) {
    let scenes = compile(&make_story(5_000), &HashSet::<String>::new()).scenes;
    let mut group = c.benchmark_group("layout");
    group.sample_size(10);
    group.bench_function("layout 5k scenes", |b| {
        b.iter(|| layout(black_box(&scenes)))
    });
    group.bench_function("runtime walk 5k scenes", |b| {
        b.iter(|| {
            for scene in &scenes {
                let mut rt = create_runtime(black_box(scene));
                for i in 0..scene.dialogue.len() {
                    rt.advance(i);
                    rt.update(400);
                }
                rt.dispose();
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
