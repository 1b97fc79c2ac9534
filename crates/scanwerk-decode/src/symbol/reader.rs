// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Symbol reader wrapping the `rqrr` QR decoder.
//
// All symbology work (finder patterns, alignment, Reed-Solomon correction,
// mode segmentation) is delegated to `rqrr`; this module only adapts its
// grid-based API to Scanwerk's error and metadata types.

use image::GrayImage;
use rqrr::PreparedImage;
use scanwerk_core::error::ScanwerkError;
use scanwerk_core::types::SymbolMeta;
use tracing::debug;

/// Raw payload extracted from a symbol, before text decoding.
#[derive(Debug, Clone)]
pub struct RawSymbol {
    /// Payload bytes exactly as stored in the symbol.
    pub bytes: Vec<u8>,
    pub meta: SymbolMeta,
}

/// Scan a grayscale image for a QR symbol and extract its raw payload.
///
/// Returns `Ok(None)` when no grid is detected. When grids are detected but
/// none of them survives symbology decoding (damaged or misdetected symbols),
/// returns [`ScanwerkError::SymbolDecode`] with the last decoder error, so the
/// caller can distinguish "nothing there" from "there, but unreadable".
pub fn read_symbol(gray: GrayImage) -> Result<Option<RawSymbol>, ScanwerkError> {
    let (width, height) = gray.dimensions();
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let (w, h) = (width as usize, height as usize);
    let buf = gray.into_raw();
    let mut prepared = PreparedImage::prepare_from_greyscale(w, h, |x, y| buf[y * w + x]);

    let grids = prepared.detect_grids();
    if grids.is_empty() {
        return Ok(None);
    }
    debug!(grid_count = grids.len(), "candidate grids detected");

    let mut last_err = None;
    for grid in &grids {
        let mut bytes = Vec::new();
        match grid.decode_to(&mut bytes) {
            Ok(meta) => {
                return Ok(Some(RawSymbol {
                    bytes,
                    meta: SymbolMeta {
                        version: meta.version.0 as u16,
                        ecc_level: meta.ecc_level,
                        mask: meta.mask,
                    },
                }));
            }
            Err(err) => {
                debug!(error = %err, "grid failed symbology decode");
                last_err = Some(err);
            }
        }
    }

    // All detected grids failed to decode.
    Err(ScanwerkError::SymbolDecode(
        last_err
            .map(|err| err.to_string())
            .unwrap_or_else(|| "no grid decoded".into()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn empty_image_has_no_symbol() {
        let result = read_symbol(GrayImage::new(0, 0)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn blank_image_has_no_symbol() {
        let img = GrayImage::from_pixel(64, 64, Luma([255u8]));
        let result = read_symbol(img).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn noise_image_yields_no_payload() {
        // Deterministic pseudo-noise; must never hallucinate a payload.
        let img = GrayImage::from_fn(64, 64, |x, y| {
            Luma([(x.wrapping_mul(31).wrapping_add(y.wrapping_mul(57)) % 251) as u8])
        });
        assert!(!matches!(read_symbol(img), Ok(Some(_))));
    }
}
