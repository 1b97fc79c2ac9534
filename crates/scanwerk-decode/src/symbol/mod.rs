// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Symbol module: the bridge to the external QR symbology decoder.

pub mod reader;

pub use reader::{RawSymbol, read_symbol};
