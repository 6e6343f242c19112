use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use popo_utility::parser::Tokenizer;
use popo_utility::{EvaluatorConfig, MathExpressionEngine, parse, standard_deny_list};
use std::hint::black_box;

const EXPRESSIONS: [&str; 6] = [
    "a + b + c",
    "sqrt(a*a + b*b)",
    "pow(sqrt(a), b) + c",
    "round(a / b, 2) if a > b else floor(c)",
    "sin(pi/2) * cos(0) + log(e) - hypot(a, b, c)",
    "max(a, b, c) - min(a, b, c) + factorial(5) // gcd(12, 18)",
];

fn benchmark_tokenizer(c: &mut Criterion) {
    let expression = EXPRESSIONS[4];

    c.bench_function("tokenizer", |b| {
        b.iter(|| black_box(Tokenizer::new(black_box(expression)).tokenize()))
    });
}

fn benchmark_screening(c: &mut Criterion) {
    let deny_list = standard_deny_list();

    c.bench_function("deny_list_check", |b| {
        b.iter(|| black_box(deny_list.check(black_box(EXPRESSIONS[5]))))
    });
}

fn benchmark_parser(c: &mut Criterion) {
    for (i, expression) in EXPRESSIONS.into_iter().enumerate() {
        c.bench_function(&format!("expr_{i}_parser"), |b| {
            b.iter(|| black_box(parse(black_box(expression))))
        });
    }
}

fn benchmark_evaluation(c: &mut Criterion) {
    let cached = MathExpressionEngine::new();
    let uncached = MathExpressionEngine::with_config(EvaluatorConfig::no_cache());

    let mut group = c.benchmark_group("evaluate");
    for (i, expression) in EXPRESSIONS.into_iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("cached", i), expression, |b, expr| {
            b.iter(|| black_box(cached.evaluate(3.0, 4.0, 5.0, black_box(expr))))
        });
        group.bench_with_input(BenchmarkId::new("uncached", i), expression, |b, expr| {
            b.iter(|| black_box(uncached.evaluate(3.0, 4.0, 5.0, black_box(expr))))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_tokenizer,
    benchmark_screening,
    benchmark_parser,
    benchmark_evaluation
);
criterion_main!(benches);
