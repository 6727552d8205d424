/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use std::path::PathBuf;
use std::time::Duration;

pub const BAUD_RATE: u32 = 9600;
pub const READ_TIMEOUT_MS: u64 = 1000;
pub const DISCOVERY_INTERVAL_MS: u64 = 200;
pub const DISCOVERY_TIMEOUT_SECS: u64 = 60;
pub const REFRESH_INTERVAL_MS: u64 = 100;

pub const TRACK_FILE_PREFIX: &str = "RCTelemData";
pub const TRACK_FILE_EXTENSION: &str = "kml";

/// Settings for one recording session. There are no flags or config
/// files, everything comes from `Default`.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub baudrate: u32,
    /// How long a single serial read may wait before yielding nothing
    pub read_timeout: Duration,
    /// Delay between two port enumerations while waiting for a device
    pub discovery_interval: Duration,
    /// Give up waiting for a device after this long
    pub discovery_timeout: Duration,
    /// Screen refresh tick
    pub refresh_interval: Duration,
    pub file_prefix: String,
    pub file_extension: String,
    pub output_dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            baudrate: BAUD_RATE,
            read_timeout: Duration::from_millis(READ_TIMEOUT_MS),
            discovery_interval: Duration::from_millis(DISCOVERY_INTERVAL_MS),
            discovery_timeout: Duration::from_secs(DISCOVERY_TIMEOUT_SECS),
            refresh_interval: Duration::from_millis(REFRESH_INTERVAL_MS),
            file_prefix: TRACK_FILE_PREFIX.to_string(),
            file_extension: TRACK_FILE_EXTENSION.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl SessionConfig {
    pub fn track_path(&self, session: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", session, self.file_extension))
    }
}
