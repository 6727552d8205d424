/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::connection::port::TelemetryPort;
use log::{error, info};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::io::Result;
use tokio_serial::{DataBits, Parity, SerialPortBuilderExt, SerialPortInfo, SerialStream, StopBits};

#[derive(Debug)]
pub struct SerialTelemetryPort {
    port: Option<SerialStream>,
    port_info: SerialPortInfo,
    baudrate: u32,
    read_timeout: Duration,
    is_open: bool,
}

impl SerialTelemetryPort {
    pub fn new(port_info: SerialPortInfo, baudrate: u32, read_timeout: Duration) -> Self {
        Self {
            port: None,
            port_info,
            baudrate,
            read_timeout,
            is_open: false,
        }
    }
}

#[async_trait::async_trait]
impl TelemetryPort for SerialTelemetryPort {
    async fn open(&mut self) -> Result<()> {
        if !self.is_open {
            self.port = Some(
                tokio_serial::new(&self.port_info.port_name, self.baudrate)
                    .data_bits(DataBits::Eight)
                    .parity(Parity::None)
                    .stop_bits(StopBits::One)
                    .timeout(self.read_timeout)
                    .open_native_async()?,
            );
            self.is_open = true;
            info!(
                "Opened telemetry serial port: {} with baudrate {}",
                self.port_info.port_name, self.baudrate
            );
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if self.is_open {
            self.port.take();
            self.is_open = false;
            info!("Closed telemetry serial port: {}", self.port_info.port_name);
        }
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if let Some(port) = &mut self.port {
            match tokio::time::timeout(self.read_timeout, port.read(buf)).await {
                Ok(result) => result,
                Err(_) => Err(std::io::Error::new(
                    std::io::ErrorKind::TimedOut,
                    "No data from telemetry port",
                )),
            }
        } else {
            error!("Read on closed port {}", self.port_info.port_name);
            Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Port is not open",
            ))
        }
    }

    fn get_baudrate(&self) -> u32 {
        self.baudrate
    }

    fn get_port_name(&self) -> String {
        self.port_info.port_name.clone()
    }
}
