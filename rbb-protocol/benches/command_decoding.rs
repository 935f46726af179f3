use criterion::{Criterion, criterion_group, criterion_main};
use rbb_protocol::Command;
use std::hint::black_box;

fn decode_stream(c: &mut Criterion) {
    // A typical OpenOCD scan: clock low, clock high, sample
    let stream: Vec<u8> = b"04R15R26R37R".repeat(256);
    c.bench_function("decode 3 KiB command stream", |b| {
        b.iter(|| {
            for byte in black_box(&stream) {
                black_box(Command::from_byte(*byte));
            }
        })
    });
}

fn encode_commands(c: &mut Criterion) {
    let commands: Vec<Command> = (0..8).map(Command::write_from_bits).collect();
    c.bench_function("encode write commands", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(commands.len());
            for cmd in black_box(&commands) {
                cmd.write_to(&mut out).unwrap();
            }
            out
        })
    });
}

criterion_group!(benches, decode_stream, encode_commands);
criterion_main!(benches);
