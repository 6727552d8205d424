/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::config::SessionConfig;
use crate::telemetry::{RecordUpdate, TelemetrySample, apply_record};
use crate::track::naming::{self, session_name};
use crate::track::TrackWriter;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::PathBuf;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    pub update: RecordUpdate,
    pub fix_written: bool,
}

/// Owns the current sample and the open track. Each record is parsed into
/// the sample and then offered to the track, in that order.
pub struct Recorder<W: Write> {
    sample: TelemetrySample,
    track: TrackWriter<W>,
    records: u64,
}

impl Recorder<BufWriter<File>> {
    /// Opens a track named after the current wall clock time.
    pub fn create(config: &SessionConfig) -> Result<(Self, PathBuf)> {
        Self::create_at(config, naming::now())
    }

    pub fn create_at(config: &SessionConfig, when: OffsetDateTime) -> Result<(Self, PathBuf)> {
        let session = session_name(&config.file_prefix, when)?;
        let path = config.track_path(&session);
        if path.exists() {
            warn!("Overwriting existing track {}", path.display());
        }
        let track = TrackWriter::create(&path, &session)?;
        Ok((Recorder::new(track), path))
    }
}

impl<W: Write> Recorder<W> {
    pub fn new(track: TrackWriter<W>) -> Self {
        Self {
            sample: TelemetrySample::default(),
            track,
            records: 0,
        }
    }

    pub fn handle_record(&mut self, record: &str) -> Result<RecordOutcome> {
        self.records += 1;
        let update = apply_record(&mut self.sample, record);
        if !update.is_complete() {
            debug!(
                "Record {} left {} field(s) unchanged: {:?}",
                self.records,
                update.skipped.len(),
                record
            );
        }

        let fix_written = self.track.record(&self.sample)?;

        Ok(RecordOutcome {
            update,
            fix_written,
        })
    }

    pub fn sample(&self) -> &TelemetrySample {
        &self.sample
    }

    pub fn records_seen(&self) -> u64 {
        self.records
    }

    pub fn fixes_written(&self) -> usize {
        self.track.fixes_written()
    }

    /// Writes the footer and releases the track. Only reachable once.
    pub fn finish(self) -> Result<W> {
        self.track.finish()
    }
}
