use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gw2chatlinks::{decode_chat_link, encode_chat_link};

// Real world links of increasing size.
const LINKS: [(&str, &str); 4] = [
    ("skill", "[&BucCAAA=]"),
    ("item", "[&AgGqtgDgfQ4AAP9fAAAnYAAA]"),
    ("user", "[&CAECAwQFBgcICQoLDA0ODxBFAGEAcwB0AGUAcgAAAA==]"),
    (
        "build_template",
        "[&DQkDJg8mPz3cEdwR1BHUESsSKxIGEgYSyhHKEQUCAgPUESsSBhIGEtQRKxICBQAvAAA=]",
    ),
];

fn decode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, link) in LINKS.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(name), link, |b, link| {
            b.iter(|| decode_chat_link(black_box(link)))
        });
    }
    group.finish();
}

fn encode_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (name, link) in LINKS.iter() {
        let decoded = decode_chat_link(link).expect("benchmark link must be valid");
        group.bench_with_input(BenchmarkId::from_parameter(name), &decoded, |b, decoded| {
            b.iter(|| encode_chat_link(black_box(decoded)))
        });
    }
    group.finish();
}

criterion_group!(codec_bench, decode_benchmark, encode_benchmark);
criterion_main!(codec_bench);
