// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The transform cascade: which preprocessing variants to try, in which order,
// and how to produce each one from the raw luma base.

use image::{DynamicImage, GrayImage};
use scanwerk_core::config::DecodeConfig;
use scanwerk_core::types::{Quadrant, TransformKind};

use crate::image::binarize;
use crate::image::processor::ImageProcessor;

/// Contrast factor for the boost stage. Matches the value that works well for
/// flatbed scans and camera photos alike.
const CONTRAST_BOOST_FACTOR: f32 = 1.4;

/// Minimum side length of a half-image for quadrant crops to be worth trying.
/// Below this a cropped region cannot hold a scannable symbol.
const MIN_QUADRANT_SIDE: u32 = 64;

/// Build the ordered list of variants to attempt for an image of the given
/// dimensions.
///
/// Cheap, high-yield stages come first; scale changes and crops come last.
/// The plan is deterministic for a given config and image size.
pub fn stage_plan(config: &DecodeConfig, width: u32, height: u32) -> Vec<TransformKind> {
    let mut plan = vec![
        TransformKind::RawLuma,
        TransformKind::ContrastStretch,
        TransformKind::ContrastBoost,
    ];

    for &level in &config.fixed_thresholds {
        plan.push(TransformKind::Threshold(level));
    }

    plan.extend([
        TransformKind::Otsu,
        TransformKind::Adaptive,
        TransformKind::Blur,
        TransformKind::BlurOtsu,
        TransformKind::Sharpen,
        TransformKind::Invert,
    ]);

    let longest = width.max(height);
    if longest < config.upscale_below {
        plan.push(TransformKind::Upscale);
    }
    if longest > config.max_dimension {
        plan.push(TransformKind::Downscale);
    }

    if config.try_quadrants && width / 2 >= MIN_QUADRANT_SIDE && height / 2 >= MIN_QUADRANT_SIDE {
        plan.extend(Quadrant::ALL.iter().map(|q| TransformKind::Crop(*q)));
    }

    plan
}

/// Produce the variant described by `kind` from the raw luma base.
///
/// Every stage derives from the base, never from another stage's output, so
/// reordering the plan never changes what any one stage produces.
pub fn apply_stage(kind: TransformKind, base: &GrayImage, config: &DecodeConfig) -> GrayImage {
    let processor = || ImageProcessor::from_dynamic(DynamicImage::ImageLuma8(base.clone()));

    match kind {
        TransformKind::RawLuma => base.clone(),
        TransformKind::ContrastStretch => binarize::stretch_contrast(base),
        TransformKind::ContrastBoost => processor()
            .adjust_contrast(CONTRAST_BOOST_FACTOR)
            .into_luma8(),
        TransformKind::Threshold(level) => binarize::apply_threshold(base, level),
        TransformKind::Otsu => binarize::apply_threshold(base, binarize::otsu_threshold(base)),
        TransformKind::Adaptive => {
            binarize::adaptive_threshold(base, config.adaptive_block_radius, config.adaptive_bias)
        }
        TransformKind::Blur => processor().blur(config.blur_sigma).into_luma8(),
        TransformKind::BlurOtsu => {
            let blurred = processor().blur(config.blur_sigma).into_luma8();
            let level = binarize::otsu_threshold(&blurred);
            binarize::apply_threshold(&blurred, level)
        }
        TransformKind::Sharpen => processor().sharpen().into_luma8(),
        TransformKind::Invert => processor().invert().into_luma8(),
        TransformKind::Upscale => {
            let (w, h) = base.dimensions();
            processor().resize(w * 2, h * 2).into_luma8()
        }
        TransformKind::Downscale => processor()
            .resize(config.max_dimension, config.max_dimension)
            .into_luma8(),
        TransformKind::Crop(quadrant) => processor().crop_quadrant(quadrant).into_luma8(),
    }
}
