/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use super::kml;
use crate::telemetry::TelemetrySample;
use crate::utilities::feet_to_meters;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

/// Last coordinate that passed the validity gate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LastFix {
    pub latitude: f64,
    pub longitude: f64,
}

impl LastFix {
    /// Both axes must have moved, a change on only one is not enough.
    pub fn differs_from(&self, sample: &TelemetrySample) -> bool {
        sample.longitude != self.longitude && sample.latitude != self.latitude
    }
}

/// Whether the sample carries a usable fix.
pub fn is_valid_fix(sample: &TelemetrySample) -> bool {
    !sample.longitude.is_nan()
        && !sample.latitude.is_nan()
        && !sample.altitude.is_nan()
        && sample.longitude != 0.0
        && sample.latitude != 0.0
}

/// Appends fixes to a KML line string.
///
/// The header goes out in [`TrackWriter::new`], the footer only in
/// [`TrackWriter::finish`], which consumes the writer. Dropping the writer
/// without finishing leaves the document unterminated.
pub struct TrackWriter<W: Write> {
    out: W,
    last_fix: LastFix,
    written: usize,
}

impl TrackWriter<BufWriter<File>> {
    pub fn create(path: &Path, session: &str) -> Result<Self> {
        let file = File::create(path)?;
        info!("Recording track to {}", path.display());
        TrackWriter::new(BufWriter::new(file), session)
    }
}

impl<W: Write> TrackWriter<W> {
    pub fn new(mut out: W, session: &str) -> Result<Self> {
        out.write_all(kml::header(session).as_bytes())?;
        out.flush()?;

        Ok(Self {
            out,
            last_fix: LastFix::default(),
            written: 0,
        })
    }

    /// Offers the current sample to the track. Returns `true` when a
    /// coordinate was appended.
    pub fn record(&mut self, sample: &TelemetrySample) -> Result<bool> {
        if !is_valid_fix(sample) {
            return Ok(false);
        }

        let moved = self.last_fix.differs_from(sample);
        self.last_fix = LastFix {
            latitude: sample.latitude,
            longitude: sample.longitude,
        };

        if !moved {
            debug!(
                "Fix {},{} did not move on both axes, not written",
                sample.longitude, sample.latitude
            );
            return Ok(false);
        }

        write!(
            self.out,
            "\n{},{},{}",
            sample.longitude,
            sample.latitude,
            feet_to_meters(sample.altitude)
        )?;
        self.out.flush()?;
        self.written += 1;

        Ok(true)
    }

    pub fn last_fix(&self) -> LastFix {
        self.last_fix
    }

    pub fn fixes_written(&self) -> usize {
        self.written
    }

    /// Terminates the document and hands back the flushed sink.
    pub fn finish(mut self) -> Result<W> {
        self.out.write_all(kml::FOOTER.as_bytes())?;
        self.out.flush()?;
        info!("Track closed with {} fixes", self.written);
        Ok(self.out)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn fix(latitude: f64, longitude: f64, altitude: f64) -> TelemetrySample {
        TelemetrySample {
            latitude,
            longitude,
            altitude,
            ..Default::default()
        }
    }

    fn body(doc: &str) -> Vec<String> {
        let start = doc.find("<coordinates>").unwrap() + "<coordinates>".len();
        let end = doc.find("</coordinates>").unwrap();
        doc[start..end]
            .split('\n')
            .filter(|l| !l.is_empty())
            .map(|l| l.to_string())
            .collect()
    }

    /// Walks every tag and checks that open and close tags nest.
    pub(crate) fn assert_well_formed(doc: &str) {
        let mut stack: Vec<&str> = vec![];
        let mut rest = doc;
        while let Some(open) = rest.find('<') {
            let close = rest[open..].find('>').expect("unterminated tag") + open;
            let tag = &rest[open + 1..close];
            rest = &rest[close + 1..];

            if tag.starts_with('?') || tag.ends_with('/') {
                continue;
            }
            if let Some(name) = tag.strip_prefix('/') {
                assert_eq!(Some(name), stack.pop(), "mismatched </{}>", name);
            } else {
                stack.push(tag.split_whitespace().next().unwrap());
            }
        }
        assert!(stack.is_empty(), "unclosed tags: {:?}", stack);
    }

    #[test]
    fn header_is_written_on_open() {
        let writer = TrackWriter::new(Vec::new(), "session").unwrap();
        let doc = String::from_utf8(writer.out.clone()).unwrap();
        assert_eq!(kml::header("session"), doc);
        assert!(!doc.contains(kml::FOOTER));
    }

    #[test]
    fn writes_lon_lat_meters() {
        let mut writer = TrackWriter::new(Vec::new(), "session").unwrap();
        assert!(writer.record(&fix(45.0, 12.5, 100.0)).unwrap());

        let doc = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(vec!["12.5,45,30.48"], body(&doc));
    }

    #[test]
    fn zero_latitude_is_not_a_fix() {
        let mut writer = TrackWriter::new(Vec::new(), "session").unwrap();
        assert!(!writer.record(&fix(0.0, 12.5, 10.0)).unwrap());
        assert_eq!(LastFix::default(), writer.last_fix());
        assert_eq!(0, writer.fixes_written());
    }

    #[test]
    fn nan_coordinates_are_not_a_fix() {
        let mut writer = TrackWriter::new(Vec::new(), "session").unwrap();
        assert!(!writer.record(&fix(f64::NAN, 12.5, 10.0)).unwrap());
        assert!(!writer.record(&fix(45.0, f64::NAN, 10.0)).unwrap());
        assert!(!writer.record(&fix(45.0, 12.5, f64::NAN)).unwrap());
        assert_eq!(LastFix::default(), writer.last_fix());
    }

    #[test]
    fn both_axes_must_change() {
        let mut writer = TrackWriter::new(Vec::new(), "session").unwrap();
        assert!(writer.record(&fix(45.0, 12.5, 0.0)).unwrap());
        assert!(!writer.record(&fix(46.0, 12.5, 0.0)).unwrap());

        // Rejected by the change gate but still valid, so it becomes the
        // reference for the next fix.
        assert_eq!(
            LastFix {
                latitude: 46.0,
                longitude: 12.5
            },
            writer.last_fix()
        );

        assert!(!writer.record(&fix(47.0, 12.5, 0.0)).unwrap());
        assert!(writer.record(&fix(48.0, 13.0, 0.0)).unwrap());
        assert_eq!(2, writer.fixes_written());
    }

    #[test]
    fn repeated_fix_is_written_once() {
        let mut writer = TrackWriter::new(Vec::new(), "session").unwrap();
        assert!(writer.record(&fix(45.0, 12.5, 0.0)).unwrap());
        assert!(!writer.record(&fix(45.0, 12.5, 0.0)).unwrap());
        assert_eq!(1, writer.fixes_written());
    }

    #[test]
    fn finished_document_is_well_formed_and_ordered() {
        let mut writer = TrackWriter::new(Vec::new(), "RCTelemData-2016-5-7_9-3").unwrap();
        let fixes = [
            fix(45.1, -75.1, 100.0),
            fix(45.2, -75.2, 200.0),
            fix(45.3, -75.3, 0.0),
        ];
        for f in &fixes {
            assert!(writer.record(f).unwrap());
        }

        let doc = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert!(doc.ends_with(kml::FOOTER));
        assert_well_formed(&doc);
        assert_eq!(
            vec!["-75.1,45.1,30.48", "-75.2,45.2,60.96", "-75.3,45.3,0"],
            body(&doc)
        );
    }

    #[test]
    fn empty_track_is_still_well_formed() {
        let writer = TrackWriter::new(Vec::new(), "session").unwrap();
        let doc = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_well_formed(&doc);
        assert!(body(&doc).is_empty());
    }
}
