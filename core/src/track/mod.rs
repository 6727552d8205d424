/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
pub mod kml;
pub mod naming;
pub mod writer;

pub use naming::session_name;
pub use writer::{LastFix, TrackWriter};
