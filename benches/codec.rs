//! Benchmarks for frame record encoding and decoding.

use std::io::Cursor;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use leapstream::recording::{read_record, write_record};
use leapstream::schema::{Frame, Gesture, Hand, Pointable};

fn synthetic_frame(hands: usize) -> Frame {
    Frame {
        id: 1234,
        timestamp: 9_876_543,
        current_frame_rate: 115.0,
        hands: (0..hands)
            .map(|i| Hand {
                id: i as i32,
                palm_position: [i as f32, 200.0, -30.0],
                sphere_radius: 75.0,
                time_visible: 2.5,
                ..Default::default()
            })
            .collect(),
        pointables: (0..hands * 5)
            .map(|i| Pointable {
                id: i as i32,
                hand_id: (i / 5) as i32,
                tip_position: [i as f32, 250.0, -10.0],
                length: 50.0,
                ..Default::default()
            })
            .collect(),
        gestures: vec![Gesture {
            id: 7,
            duration: 120_000,
            hand_ids: vec![0],
            pointable_ids: vec![0, 1],
            ..Default::default()
        }],
        ..Default::default()
    }
}

fn bench_record_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_codec");

    for hands in [1, 2, 4] {
        let frame = synthetic_frame(hands);

        group.bench_with_input(BenchmarkId::new("encode", hands), &frame, |b, frame| {
            b.iter(|| {
                let mut buf = Vec::with_capacity(4096);
                write_record(&mut buf, black_box(frame)).unwrap();
                buf
            });
        });

        let mut encoded = Vec::new();
        write_record(&mut encoded, &frame).unwrap();

        group.bench_with_input(BenchmarkId::new("decode", hands), &encoded, |b, encoded| {
            b.iter(|| read_record(&mut Cursor::new(black_box(encoded))).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record_roundtrip);
criterion_main!(benches);
