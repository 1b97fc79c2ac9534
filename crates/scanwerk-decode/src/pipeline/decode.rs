// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decode driver: load an image, walk the transform cascade until the symbology
// decoder yields a raw payload, then decode the payload to text.

use std::path::Path;
use std::time::Instant;

use chrono::Utc;
use image::DynamicImage;
use scanwerk_core::config::DecodeConfig;
use scanwerk_core::error::ScanwerkError;
use scanwerk_core::types::{DecodedPayload, ImageKind, ScanId, ScanReport};
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::pipeline::stages;
use crate::symbol::reader;
use crate::text::ladder::EncodingLadder;

/// The end-to-end decoder: preprocessing cascade, symbol extraction, text
/// decoding, report assembly.
///
/// Construction validates the configured encoding ladder once; the pipeline
/// can then be reused for many images.
#[derive(Debug)]
pub struct DecodePipeline {
    config: DecodeConfig,
    ladder: EncodingLadder,
}

impl DecodePipeline {
    /// Create a pipeline from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScanwerkError::InvalidConfig`] if the encoding list is empty
    /// or contains an unknown label.
    pub fn new(config: DecodeConfig) -> Result<Self, ScanwerkError> {
        let ladder = EncodingLadder::from_labels(&config.encodings)?;
        Ok(Self { config, ladder })
    }

    /// Create a pipeline with the default configuration.
    pub fn with_defaults() -> Result<Self, ScanwerkError> {
        Self::new(DecodeConfig::default())
    }

    /// Decode the image at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn decode_path(&self, path: impl AsRef<Path>) -> Result<ScanReport, ScanwerkError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        self.decode_bytes(&bytes, &path.display().to_string())
    }

    /// Decode an image from raw encoded bytes (PNG, JPEG, etc.).
    ///
    /// `source` is a label recorded in the report (typically the path).
    #[instrument(skip_all, fields(source, data_len = bytes.len()))]
    pub fn decode_bytes(&self, bytes: &[u8], source: &str) -> Result<ScanReport, ScanwerkError> {
        let format = image::guess_format(bytes)
            .map_err(|err| ScanwerkError::UnsupportedImage(err.to_string()))?;
        let image_kind = kind_of(format);
        if let Some(kind) = image_kind {
            debug!(mime = kind.mime_type(), "input format sniffed");
        }

        let source_hash = hex::encode(Sha256::digest(bytes));
        let processor = ImageProcessor::from_bytes(bytes)?;
        self.run(processor, source, source_hash, image_kind)
    }

    /// Decode an already-loaded image.
    ///
    /// The report's source hash covers the decoded pixel buffer rather than
    /// an encoded file.
    #[instrument(skip_all, fields(source, width = image.width(), height = image.height()))]
    pub fn decode_dynamic(
        &self,
        image: DynamicImage,
        source: &str,
    ) -> Result<ScanReport, ScanwerkError> {
        let source_hash = hex::encode(Sha256::digest(image.as_bytes()));
        self.run(ImageProcessor::from_dynamic(image), source, source_hash, None)
    }

    fn run(
        &self,
        processor: ImageProcessor,
        source: &str,
        source_hash: String,
        image_kind: Option<ImageKind>,
    ) -> Result<ScanReport, ScanwerkError> {
        let started_at = Utc::now();
        let clock = Instant::now();

        let (width, height) = (processor.width(), processor.height());
        let base = processor.grayscale().into_luma8();
        let plan = stages::stage_plan(&self.config, width, height);
        info!(width, height, stages = plan.len(), "starting decode cascade");

        let mut attempts: u32 = 0;
        let mut last_symbol_err: Option<String> = None;

        for kind in plan {
            attempts += 1;
            debug!(stage = %kind, attempt = attempts, "trying variant");
            let variant = stages::apply_stage(kind, &base, &self.config);

            match reader::read_symbol(variant) {
                Ok(Some(raw)) => {
                    info!(
                        stage = %kind,
                        raw_len = raw.bytes.len(),
                        version = raw.meta.version,
                        "symbol extracted"
                    );
                    let decoded = self.ladder.decode(&raw.bytes)?;
                    info!(encoding = %decoded.encoding, "decode complete");

                    return Ok(ScanReport {
                        id: ScanId::new(),
                        source: source.to_string(),
                        source_hash,
                        image_kind,
                        started_at,
                        attempts,
                        winning_transform: kind,
                        elapsed_ms: clock.elapsed().as_millis() as u64,
                        payload: DecodedPayload {
                            text: decoded.text,
                            encoding: decoded.encoding,
                            raw_len: raw.bytes.len(),
                            symbol: raw.meta,
                        },
                    });
                }
                Ok(None) => {}
                Err(ScanwerkError::SymbolDecode(detail)) => {
                    warn!(stage = %kind, detail = %detail, "grid found but not decodable");
                    last_symbol_err = Some(detail);
                }
                Err(other) => return Err(other),
            }
        }

        warn!(attempts, "no variant produced a decodable symbol");
        match last_symbol_err {
            Some(detail) => Err(ScanwerkError::SymbolDecode(detail)),
            None => Err(ScanwerkError::NoSymbolFound {
                attempts: attempts as usize,
            }),
        }
    }
}

/// Map the sniffed container format to an [`ImageKind`], when recognised.
fn kind_of(format: image::ImageFormat) -> Option<ImageKind> {
    match format {
        image::ImageFormat::Png => Some(ImageKind::Png),
        image::ImageFormat::Jpeg => Some(ImageKind::Jpeg),
        image::ImageFormat::Tiff => Some(ImageKind::Tiff),
        image::ImageFormat::Bmp => Some(ImageKind::Bmp),
        image::ImageFormat::WebP => Some(ImageKind::WebP),
        image::ImageFormat::Gif => Some(ImageKind::Gif),
        _ => None,
    }
}
