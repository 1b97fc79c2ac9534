// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text module: prioritized character-encoding fallback for raw payloads.

pub mod ladder;

pub use ladder::{DecodedText, EncodingLadder};
