/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod config;
pub mod connection;
pub mod recorder;
pub mod telemetry;
pub mod track;
pub mod utilities;

pub use config::SessionConfig;
pub use connection::{Connection, find_telemetry_ports, get_telemetry_port_connection, wait_for_port};
pub use serialport::SerialPortInfo;
pub use recorder::{RecordOutcome, Recorder};
pub use telemetry::{RecordUpdate, TelemetryField, TelemetrySample};
pub use track::TrackWriter;
