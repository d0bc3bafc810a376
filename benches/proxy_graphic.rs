use acadtags::proxy::ProxyGraphic;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

#[path = "../tests/common/mod.rs"]
mod common;

fn decode(c: &mut Criterion) {
    let data = common::blob(common::DATA);
    c.bench_function("decode", |b| {
        b.iter(|| ProxyGraphic::decode(black_box(&data)))
    });
}

fn virtual_entities(c: &mut Criterion) {
    let graphic = common::proxy_graphic(common::MULTILEADER);
    c.bench_function("virtual_entities", |b| {
        b.iter(|| black_box(&graphic).virtual_entities().count())
    });
}

fn encode(c: &mut Criterion) {
    let graphic = common::proxy_graphic(common::DATA);
    c.bench_function("to_bytes", |b| b.iter(|| black_box(&graphic).to_bytes()));
}

criterion_group!(benches, decode, virtual_entities, encode);
criterion_main!(benches);
