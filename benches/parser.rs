//! Parser benchmarks
//!
//! Run with: cargo bench --bench parser

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tstrip::diagnostics::Diagnostics;
use tstrip::lexer::Lexer;
use tstrip::parser::Parser;

/// Simple expressions
const SIMPLE_EXPR: &str = "x = 1 + 2 * 3 - 4 / 5;";

/// Binary expression tree (deep nesting)
fn generate_binary_expr(depth: usize) -> String {
    if depth == 0 {
        "x".to_string()
    } else {
        format!(
            "({} + {})",
            generate_binary_expr(depth - 1),
            generate_binary_expr(depth - 1)
        )
    }
}

/// Variable declarations
const VARIABLES: &str = r#"
let x: number = 1;
const y: number = 2;
var z = 3;
let a = x + y + z;
const b = a * 2;
"#;

/// Class definition (TypeScript)
const CLASS_DEF: &str = r#"
class Counter extends Base implements ICounter {
    private count: number = 0;
    public readonly id: number = 1;
    static instances: number = 0;

    constructor(initial: number) {
        this.count = initial;
    }

    increment(): number {
        this.count = this.count + 1;
        return this.count;
    }

    static create(): Counter {
        return new Counter(0);
    }
}
"#;

/// Interfaces and type annotations
const TYPES: &str = r#"
interface User {
    id: number;
    name: string;
    email?: string;
}
interface Admin extends User {
    level: number;
}
let ids: number[] = [1, 2, 3];
let names: Array<string> = [];
let mixed: number | string = 1;
let point: { x: number; y: number } = { x: 1, y: 2 };
"#;

/// Control flow
const CONTROL_FLOW: &str = r#"
if (ready) {
    run();
} else if (waiting) {
    hold();
} else {
    stop();
}

for (let i = 0; i < 10; i++) {
    console.log(i);
}

while (running) {
    tick();
}
"#;

/// Module statements
const MODULES: &str = r#"
import defaults, { helper, format as fmt } from "utils";
import * as math from "math";
export { helper, fmt as formatter };
export default defaults;
"#;

fn generate_large_source(size: usize) -> String {
    let mut source = String::with_capacity(size);
    let patterns = [VARIABLES, CLASS_DEF, TYPES, CONTROL_FLOW];

    let mut i = 0;
    while source.len() < size {
        source.push_str(patterns[i % patterns.len()]);
        source.push_str("\n\n");
        i += 1;
    }
    source
}

fn parse_all(source: &str) {
    let mut diagnostics = Diagnostics::new(source);
    let tokens = Lexer::new(source, &mut diagnostics).tokenize();
    let program = Parser::new(tokens, &mut diagnostics).parse();
    black_box(program);
}

fn bench_parser_individual(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/individual");

    let cases = [
        ("simple_expr", SIMPLE_EXPR),
        ("variables", VARIABLES),
        ("class_def", CLASS_DEF),
        ("types", TYPES),
        ("control_flow", CONTROL_FLOW),
        ("modules", MODULES),
    ];

    for (name, source) in cases {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("bytes", name), source, |b, s| {
            b.iter(|| parse_all(black_box(s)));
        });
    }

    group.finish();
}

fn bench_parser_nesting(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/nesting");

    for depth in [4, 8, 12] {
        let source = format!("y = {};", generate_binary_expr(depth));
        group.bench_with_input(BenchmarkId::new("binary_depth", depth), &source, |b, s| {
            b.iter(|| parse_all(black_box(s)));
        });
    }

    group.finish();
}

fn bench_parser_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser/throughput");

    let sizes = [1_000, 10_000, 100_000];

    for size in sizes {
        let source = generate_large_source(size);
        let actual_size = source.len();

        group.throughput(Throughput::Bytes(actual_size as u64));
        group.bench_with_input(
            BenchmarkId::new("large_source", format!("{}KB", actual_size / 1024)),
            &source,
            |b, s| {
                b.iter(|| parse_all(black_box(s)));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parser_individual,
    bench_parser_nesting,
    bench_parser_throughput
);
criterion_main!(benches);
