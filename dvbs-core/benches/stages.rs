use criterion::{criterion_group, criterion_main, Criterion};
use dvbs_core::convolutional::{CodeRate, ConvolutionalEncoder};
use dvbs_core::interleaver::Interleaver;
use dvbs_core::packet::RS_PACKET_LEN;
use dvbs_core::reed_solomon;

fn bench_reed_solomon(c: &mut Criterion) {
    let mut packet = [0xa5u8; RS_PACKET_LEN];
    c.bench_function("reed_solomon::encode", |b| {
        b.iter(|| reed_solomon::encode(&mut packet));
    });
}

fn bench_interleaver(c: &mut Criterion) {
    let mut interleaver = Interleaver::new();
    let mut packet = [0xa5u8; RS_PACKET_LEN];
    c.bench_function("interleaver::interleave", |b| {
        b.iter(|| interleaver.interleave(&mut packet));
    });
}

fn bench_convolutional(c: &mut Criterion) {
    let mut encoder = ConvolutionalEncoder::new();
    let packet = [0xa5u8; RS_PACKET_LEN];
    let mut iq = vec![0u8; CodeRate::R1_2.max_iq_capacity()];
    c.bench_function("convolutional::encode rate_1_2", |b| {
        b.iter(|| encoder.encode(&packet, CodeRate::R1_2, &mut iq));
    });
}

criterion_group!(
    benches,
    bench_reed_solomon,
    bench_interleaver,
    bench_convolutional
);
criterion_main!(benches);
