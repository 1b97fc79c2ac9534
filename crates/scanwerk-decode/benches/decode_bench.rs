// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the scanwerk-decode crate. Benchmarks the happy
// path (clean symbol, first variant wins) and the worst case (blank image,
// full cascade exhausted).

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, GrayImage, Luma};
use qrcode::QrCode;

use scanwerk_decode::DecodePipeline;

/// Render a QR symbol as a grayscale image with a quiet zone.
fn synthetic_qr(data: &[u8], scale: u32, quiet: u32) -> GrayImage {
    let code = QrCode::new(data).expect("bench payload must encode");
    let colors = code.to_colors();
    let modules = code.width() as u32;
    let size = (modules + 2 * quiet) * scale;

    let mut img = GrayImage::from_pixel(size, size, Luma([255u8]));
    for (i, color) in colors.iter().enumerate() {
        if *color == qrcode::Color::Dark {
            let mx = (i as u32 % modules + quiet) * scale;
            let my = (i as u32 / modules + quiet) * scale;
            for dy in 0..scale {
                for dx in 0..scale {
                    img.put_pixel(mx + dx, my + dy, Luma([0u8]));
                }
            }
        }
    }
    img
}

/// Clean symbol: the raw-luma variant decodes immediately.
fn bench_first_variant_hit(c: &mut Criterion) {
    let img = synthetic_qr(b"https://example.com/bench", 8, 4);
    let pipeline = DecodePipeline::with_defaults().expect("default config is valid");

    c.bench_function("decode clean symbol (first variant)", |b| {
        b.iter(|| {
            let report = pipeline
                .decode_dynamic(
                    DynamicImage::ImageLuma8(black_box(img.clone())),
                    "bench-clean",
                )
                .expect("clean symbol decodes");
            black_box(report);
        });
    });
}

/// Blank image: every variant is produced and scanned, none succeeds. This is
/// the realistic cost ceiling per input.
fn bench_full_cascade_miss(c: &mut Criterion) {
    let img = GrayImage::from_pixel(400, 400, Luma([255u8]));
    let pipeline = DecodePipeline::with_defaults().expect("default config is valid");

    c.bench_function("exhaust cascade on blank 400x400", |b| {
        b.iter(|| {
            let err = pipeline
                .decode_dynamic(
                    DynamicImage::ImageLuma8(black_box(img.clone())),
                    "bench-blank",
                )
                .expect_err("blank image cannot decode");
            black_box(err);
        });
    });
}

criterion_group!(benches, bench_first_variant_hit, bench_full_cascade_miss);
criterion_main!(benches);
