/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use std::fmt::Debug;
use tokio::io::Result;

/// Byte source a telemetry receiver is attached to.
#[async_trait::async_trait]
pub trait TelemetryPort: Send + Debug {
    async fn open(&mut self) -> Result<()>;
    async fn close(&mut self) -> Result<()>;
    /// Reads whatever is available. A read that waits too long fails
    /// with `ErrorKind::TimedOut`.
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize>;

    fn get_baudrate(&self) -> u32;
    fn get_port_name(&self) -> String;
}
