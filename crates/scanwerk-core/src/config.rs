// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decode pipeline configuration.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the decode cascade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeConfig {
    /// Longest image side above which a downscaled variant is also tried.
    pub max_dimension: u32,
    /// Longest image side below which a 2x upscaled variant is also tried.
    pub upscale_below: u32,
    /// Fixed binarization levels, tried in order.
    pub fixed_thresholds: Vec<u8>,
    /// Neighbourhood radius for adaptive binarization.
    pub adaptive_block_radius: u32,
    /// Constant subtracted from the local mean in adaptive binarization.
    pub adaptive_bias: i32,
    /// Sigma for the Gaussian blur stages.
    pub blur_sigma: f32,
    /// Whether to fall back to quadrant crops after the whole-image stages.
    pub try_quadrants: bool,
    /// Text encodings tried against the raw payload, in priority order.
    pub encodings: Vec<String>,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1600,
            upscale_below: 300,
            fixed_thresholds: vec![80, 128, 176],
            adaptive_block_radius: 15,
            adaptive_bias: 10,
            blur_sigma: 1.2,
            try_quadrants: true,
            encodings: vec!["utf-8".into(), "gbk".into(), "gb2312".into()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_encoding_ladder_order() {
        let config = DecodeConfig::default();
        assert_eq!(config.encodings, ["utf-8", "gbk", "gb2312"]);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = DecodeConfig {
            try_quadrants: false,
            fixed_thresholds: vec![100],
            ..DecodeConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: DecodeConfig = serde_json::from_str(&json).unwrap();
        assert!(!back.try_quadrants);
        assert_eq!(back.fixed_thresholds, [100]);
        assert_eq!(back.max_dimension, 1600);
    }
}
