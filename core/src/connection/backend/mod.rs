/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod serial_backend;
pub use serial_backend::SerialTelemetryPort;
#[cfg(test)]
pub mod memory_backend;
#[cfg(test)]
pub use memory_backend::MemoryPort;
