/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod parser;
pub mod sample;

pub use parser::{RecordUpdate, apply_record};
pub use sample::{TelemetryField, TelemetrySample};
