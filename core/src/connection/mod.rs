/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod backend;
pub mod port;
pub mod reader;
use crate::config::SessionConfig;
use crate::connection::backend::SerialTelemetryPort;
use crate::connection::port::TelemetryPort;
use crate::connection::reader::LineReader;
use log::{debug, error, info, warn};
use serialport::SerialPortInfo;
use std::io::{Error, ErrorKind};
use std::time::Instant;
use tokio::io::Result;

const READ_CHUNK: usize = 64;

#[derive(Debug)]
pub struct Connection {
    pub port: Box<dyn TelemetryPort>,
    pub baudrate: u32,
    reader: LineReader,
}

impl Connection {
    pub async fn open(mut port: Box<dyn TelemetryPort>) -> Result<Self> {
        port.open().await?;
        let baudrate = port.get_baudrate();

        Ok(Connection {
            port,
            baudrate,
            reader: LineReader::new(),
        })
    }

    /// Next record from the port, or `None` when the port had nothing
    /// complete to offer this time (quiet line, timeout, zero-byte read).
    ///
    /// Only the port read is awaited, so dropping this future mid-way
    /// loses no buffered bytes.
    pub async fn read_record(&mut self) -> Result<Option<String>> {
        if let Some(record) = self.reader.next_record() {
            return Ok(Some(record));
        }

        let mut buf = [0u8; READ_CHUNK];
        match self.port.read(&mut buf).await {
            Ok(0) => Ok(None),
            Ok(n) => {
                self.reader.push(&buf[..n]);
                Ok(self.reader.next_record())
            }
            Err(e)
                if matches!(
                    e.kind(),
                    ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
                ) =>
            {
                debug!("No data from {}: {}", self.port.get_port_name(), e);
                Ok(None)
            }
            Err(e) => {
                error!("Read from {} failed: {}", self.port.get_port_name(), e);
                Err(e)
            }
        }
    }

    pub async fn close(&mut self) -> Result<()> {
        self.port.close().await
    }
}

pub fn find_telemetry_ports() -> Vec<SerialPortInfo> {
    match serialport::available_ports() {
        Ok(ports) => ports,
        Err(e) => {
            error!("Error listing serial ports: {}", e);
            vec![]
        }
    }
}

/// Polls `list_ports` every `discovery_interval` until it reports a port
/// and returns the first one. Fails with `NotFound` once
/// `discovery_timeout` has passed.
pub async fn wait_for_port_with<F>(config: &SessionConfig, mut list_ports: F) -> Result<SerialPortInfo>
where
    F: FnMut() -> Vec<SerialPortInfo>,
{
    let started = Instant::now();
    loop {
        if let Some(port) = list_ports().into_iter().next() {
            info!("Found serial port: {}", port.port_name);
            return Ok(port);
        }

        if started.elapsed() >= config.discovery_timeout {
            return Err(Error::new(
                ErrorKind::NotFound,
                format!(
                    "No serial device found after {}s",
                    config.discovery_timeout.as_secs_f32()
                ),
            ));
        }

        warn!("No COM devices");
        tokio::time::sleep(config.discovery_interval).await;
    }
}

pub async fn wait_for_port(config: &SessionConfig) -> Result<SerialPortInfo> {
    wait_for_port_with(config, find_telemetry_ports).await
}

pub async fn get_telemetry_port_connection(
    port_info: SerialPortInfo,
    config: &SessionConfig,
) -> Result<Connection> {
    let port = SerialTelemetryPort::new(port_info, config.baudrate, config.read_timeout);
    Connection::open(Box::new(port)).await
}
