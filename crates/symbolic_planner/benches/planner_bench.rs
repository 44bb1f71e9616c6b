//! Benchmarks for the planner
//!
//! Run with: cargo bench -p symbolic_planner

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use symbolic_logic::{forward_chain, KnowledgeBase, Predicate};
use symbolic_planner::{Planner, PlannerConfig, RuleAgent};

fn walker() -> RuleAgent {
    RuleAgent::new(
        KnowledgeBase::from_lines(["at(X) & edge(X,Y) > _move(X,Y)"]).unwrap(),
        KnowledgeBase::from_lines(["_move(X,Y) > -at(X) & +at(Y)"]).unwrap(),
    )
}

/// A chain n0 -> n1 -> ... -> n{len}
fn chain(len: usize) -> KnowledgeBase {
    let mut lines = vec!["at(n0)".to_string()];
    lines.extend((0..len).map(|i| format!("edge(n{},n{})", i, i + 1)));
    KnowledgeBase::from_lines(lines.iter().map(String::as_str)).unwrap()
}

/// Benchmark forward chaining
fn bench_forward_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forward Chain");

    for size in [5, 10, 20].iter() {
        let mut lines: Vec<String> = (0..*size)
            .map(|i| format!("edge(n{},n{})", i, i + 1))
            .collect();
        lines.push("edge(X,Y) > path(X,Y)".to_string());
        lines.push("path(X,Y) & edge(Y,Z) > path(X,Z)".to_string());
        let kb = KnowledgeBase::from_lines(lines.iter().map(String::as_str)).unwrap();

        group.bench_with_input(BenchmarkId::new("transitive_closure", size), &kb, |b, kb| {
            b.iter(|| black_box(forward_chain(kb).unwrap()));
        });
    }

    group.finish();
}

/// Benchmark iterative deepening
fn bench_id_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("ID Search");
    let agent = walker();

    for len in [2, 4, 6].iter() {
        let state = chain(*len);
        let goal = Predicate::parse(&format!("at(n{})", len)).unwrap();
        let planner = Planner::with_config(&agent, PlannerConfig::new(*len));

        group.bench_with_input(BenchmarkId::new("chain", len), &state, |b, state| {
            b.iter(|| black_box(planner.plan(state, &goal).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_forward_chain, bench_id_search);
criterion_main!(benches);
