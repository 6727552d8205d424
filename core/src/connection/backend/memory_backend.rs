/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use crate::connection::port::TelemetryPort;
use std::collections::VecDeque;
use tokio::io::Result;

/// Port that replays scripted reads. Once the script runs out every read
/// times out, like a quiet serial line.
#[derive(Debug, Default)]
pub struct MemoryPort {
    reads: VecDeque<Result<Vec<u8>>>,
    is_open: bool,
}

impl MemoryPort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk(mut self, data: &[u8]) -> Self {
        self.reads.push_back(Ok(data.to_vec()));
        self
    }

    pub fn error(mut self, kind: std::io::ErrorKind) -> Self {
        self.reads
            .push_back(Err(std::io::Error::new(kind, "scripted failure")));
        self
    }
}

#[async_trait::async_trait]
impl TelemetryPort for MemoryPort {
    async fn open(&mut self) -> Result<()> {
        self.is_open = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.is_open = false;
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        if !self.is_open {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "Port is not open",
            ));
        }

        match self.reads.pop_front() {
            Some(Ok(mut data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.reads.push_front(Ok(data.split_off(n)));
                }
                Ok(n)
            }
            Some(Err(e)) => Err(e),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "No data from telemetry port",
            )),
        }
    }

    fn get_baudrate(&self) -> u32 {
        9600
    }

    fn get_port_name(&self) -> String {
        "memory".to_string()
    }
}
