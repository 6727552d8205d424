/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use super::sample::{TelemetryField, TelemetrySample};
use log::debug;
use strum::{EnumCount, IntoEnumIterator};

pub const FIELD_DELIMITER: char = ',';

/// Which fields one record managed to update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordUpdate {
    pub updated: Vec<TelemetryField>,
    pub skipped: Vec<TelemetryField>,
}

impl RecordUpdate {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    pub fn was_skipped(&self, field: TelemetryField) -> bool {
        self.skipped.contains(&field)
    }
}

/// Applies one record (terminator already stripped) to the sample.
///
/// The first five fields end at a comma, the sixth takes the rest of the
/// record. A field that is missing or does not parse keeps its previous
/// value; nothing is rolled back when a later field fails.
pub fn apply_record(sample: &mut TelemetrySample, record: &str) -> RecordUpdate {
    let mut raw_fields = record.splitn(TelemetryField::COUNT, FIELD_DELIMITER);
    let mut update = RecordUpdate::default();

    for field in TelemetryField::iter() {
        let raw = raw_fields.next();
        match raw.and_then(parse_field) {
            Some(value) => {
                sample.set(field, value);
                update.updated.push(field);
            }
            None => {
                debug!("Skipping {} field: {:?}", field.as_ref(), raw);
                update.skipped.push(field);
            }
        }
    }

    update
}

fn parse_field(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
