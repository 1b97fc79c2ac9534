// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanwerk-decode: the decoding engine of Scanwerk.
//
// Provides image loading and preprocessing (grayscale, contrast, thresholding,
// blur, sharpen, invert, resize, quadrant crops), an ordered cascade that runs
// the external symbology decoder against each variant until one succeeds, and
// a prioritized text-encoding fallback for the raw payload.

pub mod image;
pub mod pipeline;
pub mod symbol;
pub mod text;

// Re-export the primary structs so callers can use `scanwerk_decode::DecodePipeline` etc.
pub use self::image::processor::ImageProcessor;
pub use self::pipeline::decode::DecodePipeline;
pub use self::text::ladder::EncodingLadder;
