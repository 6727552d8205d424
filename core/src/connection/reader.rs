/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use log::warn;

pub const RECORD_TERMINATOR: u8 = b'\n';
pub const MAX_RECORD_LEN: usize = 256;

/// Splits an incoming byte stream into newline terminated records.
#[derive(Debug, Default)]
pub struct LineReader {
    buffer: Vec<u8>,
    discarding: bool,
}

impl LineReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Next complete record without its terminator, or `None` if the
    /// buffer holds only a partial one.
    pub fn next_record(&mut self) -> Option<String> {
        loop {
            let Some(end) = self.buffer.iter().position(|&b| b == RECORD_TERMINATOR) else {
                if self.buffer.len() > MAX_RECORD_LEN {
                    warn!(
                        "Dropping {} bytes without a record terminator",
                        self.buffer.len()
                    );
                    self.buffer.clear();
                    self.discarding = true;
                }
                return None;
            };

            let line: Vec<u8> = self.buffer.drain(..=end).collect();

            // Tail of an oversized line
            if self.discarding {
                self.discarding = false;
                continue;
            }

            let mut line = &line[..end];
            if let Some(stripped) = line.strip_suffix(b"\r") {
                line = stripped;
            }
            return Some(String::from_utf8_lossy(line).into_owned());
        }
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}
