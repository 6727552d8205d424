/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/

pub const METERS_PER_FOOT: f64 = 0.3048;
pub const MILES_PER_KILOMETER: f64 = 0.62137119;

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

pub fn kph_to_mph(kph: f64) -> f64 {
    kph * MILES_PER_KILOMETER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_feet_is_exactly_30_48_meters() {
        assert_eq!(30.48, feet_to_meters(100.0));
        assert_eq!("30.48", feet_to_meters(100.0).to_string());
    }

    #[test]
    fn kph_to_mph_conversion() {
        assert!((kph_to_mph(100.0) - 62.137119).abs() < 1e-9);
        assert_eq!(0.0, kph_to_mph(0.0));
    }
}
