// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Scanwerk decoder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one decode run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanId(pub Uuid);

impl ScanId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ScanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ScanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supported input image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageKind {
    Png,
    Jpeg,
    Tiff,
    Bmp,
    WebP,
    Gif,
}

impl ImageKind {
    /// MIME type string for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Tiff => "image/tiff",
            Self::Bmp => "image/bmp",
            Self::WebP => "image/webp",
            Self::Gif => "image/gif",
        }
    }

    /// Infer image format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "tif" | "tiff" => Some(Self::Tiff),
            "bmp" => Some(Self::Bmp),
            "webp" => Some(Self::WebP),
            "gif" => Some(Self::Gif),
            _ => None,
        }
    }
}

/// Regions produced by the crop stages of the cascade.
///
/// The four quadrants cover symbols sitting off-centre in a larger photo;
/// the centre region covers symbols surrounded by busy margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Quadrant {
    /// All crop regions, in attempt order.
    pub const ALL: [Quadrant; 5] = [
        Quadrant::TopLeft,
        Quadrant::TopRight,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
        Quadrant::Center,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Center => "center",
        }
    }
}

/// One preprocessing variant in the decode cascade.
///
/// Every stage derives from the raw luma base image, so the enum value is a
/// complete description of how a variant was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransformKind {
    /// The image as loaded, converted to 8-bit grayscale.
    RawLuma,
    /// Min/max histogram stretch to the full [0, 255] range.
    ContrastStretch,
    /// Fixed-factor contrast boost around the mid-grey point.
    ContrastBoost,
    /// Global binarization at a fixed level.
    Threshold(u8),
    /// Global binarization at the Otsu-derived level.
    Otsu,
    /// Local-mean adaptive binarization.
    Adaptive,
    /// Gaussian blur for noise and texture suppression.
    Blur,
    /// Gaussian blur followed by Otsu binarization.
    BlurOtsu,
    /// 3x3 sharpening kernel.
    Sharpen,
    /// Luma inversion, for light-on-dark symbols.
    Invert,
    /// 2x upscale of small images.
    Upscale,
    /// Aspect-preserving downscale of oversized images.
    Downscale,
    /// Crop to one region of the frame.
    Crop(Quadrant),
}

impl std::fmt::Display for TransformKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RawLuma => write!(f, "raw-luma"),
            Self::ContrastStretch => write!(f, "contrast-stretch"),
            Self::ContrastBoost => write!(f, "contrast-boost"),
            Self::Threshold(level) => write!(f, "threshold({level})"),
            Self::Otsu => write!(f, "otsu"),
            Self::Adaptive => write!(f, "adaptive"),
            Self::Blur => write!(f, "blur"),
            Self::BlurOtsu => write!(f, "blur-otsu"),
            Self::Sharpen => write!(f, "sharpen"),
            Self::Invert => write!(f, "invert"),
            Self::Upscale => write!(f, "upscale"),
            Self::Downscale => write!(f, "downscale"),
            Self::Crop(quadrant) => write!(f, "crop({})", quadrant.label()),
        }
    }
}

/// Symbol metadata reported by the symbology decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMeta {
    /// QR version (1..=40).
    pub version: u16,
    /// Error-correction level.
    pub ecc_level: u16,
    /// Data mask pattern.
    pub mask: u16,
}

/// The decoded payload of a symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodedPayload {
    /// The payload as text.
    pub text: String,
    /// Canonical name of the encoding that decoded the raw bytes.
    pub encoding: String,
    /// Length of the raw payload in bytes.
    pub raw_len: usize,
    pub symbol: SymbolMeta,
}

/// Full record of one decode run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    pub id: ScanId,
    /// Path or label of the source image.
    pub source: String,
    /// SHA-256 hash of the source image bytes.
    pub source_hash: String,
    /// Sniffed input format, when known.
    pub image_kind: Option<ImageKind>,
    pub started_at: DateTime<Utc>,
    /// Number of cascade variants tried, including the winning one.
    pub attempts: u32,
    /// The variant that produced the symbol.
    pub winning_transform: TransformKind,
    pub elapsed_ms: u64,
    pub payload: DecodedPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_kind_from_extension() {
        assert_eq!(ImageKind::from_extension("PNG"), Some(ImageKind::Png));
        assert_eq!(ImageKind::from_extension("jpeg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("jpg"), Some(ImageKind::Jpeg));
        assert_eq!(ImageKind::from_extension("tar"), None);
        assert_eq!(ImageKind::Png.mime_type(), "image/png");
    }

    #[test]
    fn transform_kind_labels() {
        assert_eq!(TransformKind::Threshold(128).to_string(), "threshold(128)");
        assert_eq!(
            TransformKind::Crop(Quadrant::TopRight).to_string(),
            "crop(top-right)"
        );
        assert_eq!(TransformKind::RawLuma.to_string(), "raw-luma");
    }

    #[test]
    fn scan_ids_are_unique() {
        let id = ScanId::new();
        assert_ne!(id, ScanId::new());
        assert_eq!(id.to_string().len(), 36);
    }

    #[test]
    fn report_round_trips_through_json() {
        let report = ScanReport {
            id: ScanId::new(),
            source: "tag.png".into(),
            source_hash: "00".repeat(32),
            image_kind: Some(ImageKind::Png),
            started_at: chrono::Utc::now(),
            attempts: 3,
            winning_transform: TransformKind::Otsu,
            elapsed_ms: 12,
            payload: DecodedPayload {
                text: "hello".into(),
                encoding: "UTF-8".into(),
                raw_len: 5,
                symbol: SymbolMeta {
                    version: 2,
                    ecc_level: 1,
                    mask: 4,
                },
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        let back: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, report.id);
        assert_eq!(back.winning_transform, TransformKind::Otsu);
        assert_eq!(back.payload.text, "hello");
    }
}
