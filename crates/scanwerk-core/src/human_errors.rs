// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command line.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The taxonomy uses three severity levels that drive exit diagnostics.

use crate::error::ScanwerkError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// A retake or retry may well succeed.
    Transient,
    /// User must do something (fix the path, change an option).
    ActionRequired,
    /// Cannot be fixed by retrying: wrong format, non-text payload, etc.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown first).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether trying again with the same input could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `ScanwerkError` into a `HumanError` anyone can act on.
pub fn humanize_error(err: &ScanwerkError) -> HumanError {
    match err {
        ScanwerkError::ImageError(_) => HumanError {
            message: "There's a problem with this image.".into(),
            suggestion: "The file may be damaged or in an unusual format. Try re-exporting it as a PNG or JPEG.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        ScanwerkError::UnsupportedImage(detail) => HumanError {
            message: "This type of file isn't supported.".into(),
            suggestion: format!("Try converting it to PNG or JPEG first. (File type: {detail})"),
            retriable: false,
            severity: Severity::Permanent,
        },

        ScanwerkError::NoSymbolFound { attempts } => HumanError {
            message: "No code could be found in this picture.".into(),
            suggestion: format!(
                "Make sure the code fills a good part of the frame, is well lit and in focus, then try again. ({attempts} variants were tried.)"
            ),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::SymbolDecode(_) => HumanError {
            message: "A code was found but couldn't be read.".into(),
            suggestion: "Part of the code may be damaged, covered, or too distorted. Try a sharper, straight-on photo.".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        ScanwerkError::TextEncoding(_) => HumanError {
            message: "The code's contents aren't readable text.".into(),
            suggestion: "The payload may be binary data or use an uncommon encoding. You can add encodings with --encoding.".into(),
            retriable: false,
            severity: Severity::Permanent,
        },

        ScanwerkError::InvalidConfig(detail) => HumanError {
            message: "The decoder settings aren't valid.".into(),
            suggestion: format!("Check the options you passed. ({detail})"),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ScanwerkError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "The file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "The file can't be read with the current permissions.".into(),
                    suggestion: "Check the file permissions, or try copying the file somewhere readable first.".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading the file.".into(),
                    suggestion: "Try again. If this keeps happening, check the disk the file lives on.".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        ScanwerkError::Serialization(_) => HumanError {
            message: "The report couldn't be written.".into(),
            suggestion: "Try again. If this keeps happening, please report it.".into(),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}
