/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use strum_macros::{AsRefStr, EnumCount, EnumIter};

/// Fields of a telemetry record, in the order the transmitter sends them.
#[derive(EnumIter, EnumCount, AsRefStr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryField {
    #[strum(serialize = "Top Speed")]
    TopSpeed,
    #[strum(serialize = "Speed")]
    Speed,
    #[strum(serialize = "Max Alt")]
    MaxAltitude,
    #[strum(serialize = "Altitude")]
    Altitude,
    #[strum(serialize = "Latitude")]
    Latitude,
    #[strum(serialize = "Longitude")]
    Longitude,
}

/// Most recently known readings. Every field holds the last value that
/// parsed for it, so fields may lag behind each other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TelemetrySample {
    pub top_speed: f64,
    pub speed: f64,
    pub max_altitude: f64,
    pub altitude: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl TelemetrySample {
    pub fn get(&self, field: TelemetryField) -> f64 {
        match field {
            TelemetryField::TopSpeed => self.top_speed,
            TelemetryField::Speed => self.speed,
            TelemetryField::MaxAltitude => self.max_altitude,
            TelemetryField::Altitude => self.altitude,
            TelemetryField::Latitude => self.latitude,
            TelemetryField::Longitude => self.longitude,
        }
    }

    pub fn set(&mut self, field: TelemetryField, value: f64) {
        let slot = match field {
            TelemetryField::TopSpeed => &mut self.top_speed,
            TelemetryField::Speed => &mut self.speed,
            TelemetryField::MaxAltitude => &mut self.max_altitude,
            TelemetryField::Altitude => &mut self.altitude,
            TelemetryField::Latitude => &mut self.latitude,
            TelemetryField::Longitude => &mut self.longitude,
        };
        *slot = value;
    }
}
