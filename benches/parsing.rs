//! Criterion benchmarks for record parsing and serialization.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use aid_discovery::{parse, AidRecordBuilder, AuthToken, ProtocolToken};

/// Benchmark: parse with records of varying complexity
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let test_cases = [
        ("minimal", "v=aid1;u=https://a.co/m;p=mcp"),
        (
            "typical",
            "v=aid1;uri=https://api.example.com/mcp;proto=mcp;auth=pat",
        ),
        (
            "full",
            "v=aid1;uri=https://api.example.com/mcp;proto=mcp;auth=oauth2_code;desc=Example customer support agent;docs=https://docs.example.com/agent;dep=2030-01-01T00:00:00Z",
        ),
        (
            "unknown_keys",
            "v=aid1;u=https://api.example.com/mcp;p=mcp;x-region=eu-west-1;x-team=platform",
        ),
    ];

    for (name, txt) in test_cases {
        group.throughput(Throughput::Bytes(txt.len() as u64));
        group.bench_with_input(BenchmarkId::new("txt", name), &txt, |b, txt| {
            b.iter(|| parse(black_box(txt)));
        });
    }

    group.finish();
}

/// Benchmark: rejection paths
fn bench_parse_invalid(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_invalid");

    let test_cases = [
        ("unrelated_txt", "google-site-verification=abc123def456"),
        ("bad_scheme", "v=aid1;uri=http://api.example.com;proto=mcp"),
        (
            "duplicate_alias",
            "v=aid1;uri=https://api.example.com;u=https://api.example.com;p=mcp",
        ),
        ("bad_proto", "v=aid1;uri=https://api.example.com;proto=ftp"),
    ];

    for (name, txt) in test_cases {
        group.bench_with_input(BenchmarkId::new("txt", name), &txt, |b, txt| {
            b.iter(|| parse(black_box(txt)));
        });
    }

    group.finish();
}

/// Benchmark: canonical wire form generation
fn bench_to_txt_record(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_txt_record");

    let minimal = parse("v=aid1;u=https://a.co/m;p=mcp").expect("valid test record");
    let full = parse(
        "v=aid1;uri=https://api.example.com/mcp;proto=mcp;auth=oauth2_code;desc=Example agent;docs=https://docs.example.com;dep=2030-01-01T00:00:00Z",
    )
    .expect("valid test record");

    group.bench_function("minimal", |b| {
        b.iter(|| black_box(&minimal).to_txt_record());
    });
    group.bench_function("full", |b| {
        b.iter(|| black_box(&full).to_txt_record());
    });

    group.finish();
}

/// Benchmark: builder construction and validation
fn bench_builder(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder");

    group.bench_function("minimal", |b| {
        b.iter(|| {
            AidRecordBuilder::new(black_box("https://api.example.com/mcp"), ProtocolToken::Mcp)
                .build()
        });
    });

    group.bench_function("full", |b| {
        b.iter(|| {
            AidRecordBuilder::new(black_box("https://api.example.com/mcp"), ProtocolToken::Mcp)
                .auth(AuthToken::Pat)
                .desc(black_box("Example customer support agent"))
                .docs(black_box("https://docs.example.com/agent"))
                .dep(black_box("2030-01-01T00:00:00Z"))
                .build()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_parse,
    bench_parse_invalid,
    bench_to_txt_record,
    bench_builder,
);
criterion_main!(benches);
