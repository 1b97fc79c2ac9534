// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline module: the ordered transform cascade and the decode driver.

pub mod decode;
pub mod stages;

pub use decode::DecodePipeline;
