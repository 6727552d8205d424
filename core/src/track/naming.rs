/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/
use std::io::{Error, ErrorKind, Result};
use time::OffsetDateTime;
use time::macros::format_description;

/// `<prefix>-<year>-<month>-<day>_<hour>-<minute>`, unpadded. Two sessions
/// started in the same minute get the same name.
pub fn session_name(prefix: &str, when: OffsetDateTime) -> Result<String> {
    let stamp = when
        .format(format_description!(
            "[year]-[month padding:none]-[day padding:none]_[hour padding:none]-[minute padding:none]"
        ))
        .map_err(|e| Error::new(ErrorKind::Other, format!("Failed to format timestamp: {}", e)))?;

    Ok(format!("{}-{}", prefix, stamp))
}

/// Wall clock in the local offset, UTC if the offset can't be determined.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn name_is_unpadded() {
        let name = session_name("RCTelemData", datetime!(2016-05-07 9:03 UTC)).unwrap();
        assert_eq!("RCTelemData-2016-5-7_9-3", name);
    }

    #[test]
    fn name_keeps_two_digit_parts() {
        let name = session_name("RCTelemData", datetime!(2026-10-19 23:45:59 UTC)).unwrap();
        assert_eq!("RCTelemData-2026-10-19_23-45", name);
    }

    #[test]
    fn same_minute_same_name() {
        let a = session_name("x", datetime!(2026-10-19 12:30:01 UTC)).unwrap();
        let b = session_name("x", datetime!(2026-10-19 12:30:58 UTC)).unwrap();
        assert_eq!(a, b);
    }
}
