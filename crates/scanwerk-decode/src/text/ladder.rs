// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Encoding ladder: decode raw payload bytes against a prioritized list of
// character encodings, stopping at the first strict success.
//
// QR payloads found in the wild are frequently GBK- or GB2312-encoded rather
// than UTF-8, so the default ladder is utf-8, gbk, gb2312. Labels are resolved
// through the WHATWG Encoding Standard tables via `encoding_rs`.

use encoding_rs::Encoding;
use scanwerk_core::error::ScanwerkError;
use tracing::{debug, warn};

/// A payload successfully decoded to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    /// Canonical name of the encoding that succeeded (e.g. "UTF-8", "GBK").
    pub encoding: String,
}

/// Prioritized list of text encodings to try against a raw payload.
#[derive(Debug)]
pub struct EncodingLadder {
    encodings: Vec<&'static Encoding>,
}

impl EncodingLadder {
    /// Build a ladder from encoding labels ("utf-8", "gbk", "gb2312", ...).
    ///
    /// # Errors
    ///
    /// Returns [`ScanwerkError::InvalidConfig`] for an empty list or a label
    /// the Encoding Standard does not know.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, ScanwerkError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut encodings = Vec::new();
        for label in labels {
            let label = label.as_ref();
            let encoding = Encoding::for_label(label.as_bytes()).ok_or_else(|| {
                ScanwerkError::InvalidConfig(format!("unknown encoding label: {label}"))
            })?;
            encodings.push(encoding);
        }
        if encodings.is_empty() {
            return Err(ScanwerkError::InvalidConfig(
                "encoding list is empty".into(),
            ));
        }
        Ok(Self { encodings })
    }

    /// Decode raw bytes with the first encoding that accepts them strictly.
    ///
    /// Strict means no replacement characters: any malformed sequence fails
    /// that rung and the next encoding is tried.
    ///
    /// # Errors
    ///
    /// Returns [`ScanwerkError::TextEncoding`] naming every encoding tried
    /// when none of them accepts the payload.
    pub fn decode(&self, raw: &[u8]) -> Result<DecodedText, ScanwerkError> {
        for encoding in &self.encodings {
            debug!(encoding = encoding.name(), "trying text encoding");
            match encoding.decode_without_bom_handling_and_without_replacement(raw) {
                Some(text) => {
                    debug!(encoding = encoding.name(), chars = text.chars().count(), "payload decoded");
                    return Ok(DecodedText {
                        text: text.into_owned(),
                        encoding: encoding.name().to_string(),
                    });
                }
                None => {
                    warn!(
                        encoding = encoding.name(),
                        "strict decode failed, trying next encoding"
                    );
                }
            }
        }

        let tried = self
            .encodings
            .iter()
            .map(|encoding| encoding.name())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ScanwerkError::TextEncoding(format!("tried {tried}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_ladder() -> EncodingLadder {
        EncodingLadder::from_labels(["utf-8", "gbk", "gb2312"]).unwrap()
    }

    #[test]
    fn ascii_decodes_as_utf8() {
        let decoded = default_ladder().decode(b"https://example.com/a?b=1").unwrap();
        assert_eq!(decoded.text, "https://example.com/a?b=1");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn utf8_chinese_stays_utf8() {
        let decoded = default_ladder().decode("你好".as_bytes()).unwrap();
        assert_eq!(decoded.text, "你好");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn gbk_bytes_fall_through_to_gbk() {
        // "你好" in GBK: C4 E3 BA C3. Not valid UTF-8.
        let decoded = default_ladder().decode(&[0xC4, 0xE3, 0xBA, 0xC3]).unwrap();
        assert_eq!(decoded.text, "你好");
        assert_eq!(decoded.encoding, "GBK");
    }

    #[test]
    fn empty_payload_is_empty_utf8_text() {
        let decoded = default_ladder().decode(&[]).unwrap();
        assert_eq!(decoded.text, "");
        assert_eq!(decoded.encoding, "UTF-8");
    }

    #[test]
    fn undecodable_bytes_name_every_rung() {
        // 0xFF is invalid as a lead byte in UTF-8 and GBK alike.
        let err = default_ladder().decode(&[0xFF, 0xFF, 0xFF]).unwrap_err();
        match err {
            ScanwerkError::TextEncoding(detail) => {
                assert!(detail.contains("UTF-8"));
                assert!(detail.contains("GBK"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = EncodingLadder::from_labels(["utf-8", "klingon-1"]).unwrap_err();
        assert!(matches!(err, ScanwerkError::InvalidConfig(_)));
    }

    #[test]
    fn empty_ladder_is_rejected() {
        let labels: [&str; 0] = [];
        let err = EncodingLadder::from_labels(labels).unwrap_err();
        assert!(matches!(err, ScanwerkError::InvalidConfig(_)));
    }

    #[test]
    fn gb2312_label_resolves() {
        // The Encoding Standard maps the gb2312 label to the GBK decoder;
        // the rung still has to resolve and decode.
        let ladder = EncodingLadder::from_labels(["gb2312"]).unwrap();
        let decoded = ladder.decode(&[0xC4, 0xE3]).unwrap();
        assert_eq!(decoded.text, "你");
        assert_eq!(decoded.encoding, "GBK");
    }
}
