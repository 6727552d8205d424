/*
    SPDX-License-Identifier: AGPL-3.0-or-later
    SPDX-FileCopyrightText: 2025 Shomy
*/

pub const DOCUMENT_NAME: &str = "Radio Control Telemetry";
pub const STYLE_ID: &str = "transPurpleLineGreenPoly";
// aabbggrr
pub const LINE_COLOR: &str = "7fff00ff";
pub const LINE_WIDTH: u32 = 4;
pub const POLY_COLOR: &str = "7f00ff00";

/// Closes the coordinate list opened by [`header`]. Until this is written
/// the document is not valid KML.
pub const FOOTER: &str = "</coordinates></LineString></Placemark></Document></kml>";

/// Everything up to and including the opening `<coordinates>` tag of the
/// single line string. `session` names the placemark and must not need
/// XML escaping.
pub fn header(session: &str) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
            "<kml xmlns=\"http://www.opengis.net/kml/2.2\">",
            "<Document><name>{name}</name>",
            "<Style id=\"{style}\">",
            "<LineStyle><color>{line_color}</color><width>{line_width}</width></LineStyle>",
            "<PolyStyle><color>{poly_color}</color></PolyStyle>",
            "</Style>",
            "<Placemark><name>{session}</name>",
            "<visibility>1</visibility>",
            "<description>{name}</description>",
            "<styleUrl>#{style}</styleUrl>",
            "<LineString><tessellate>1</tessellate>",
            "<altitudeMode>absolute</altitudeMode>",
            "<coordinates>"
        ),
        name = DOCUMENT_NAME,
        style = STYLE_ID,
        line_color = LINE_COLOR,
        line_width = LINE_WIDTH,
        poly_color = POLY_COLOR,
        session = session,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_opens_the_coordinate_list() {
        let header = header("RCTelemData-2016-5-7_9-3");
        assert!(header.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?><kml "));
        assert!(header.ends_with("<coordinates>"));
        assert!(header.contains("<Placemark><name>RCTelemData-2016-5-7_9-3</name>"));
        assert!(header.contains("<styleUrl>#transPurpleLineGreenPoly</styleUrl>"));
        assert!(header.contains("<LineStyle><color>7fff00ff</color><width>4</width></LineStyle>"));
    }

    #[test]
    fn footer_closes_what_header_opens() {
        assert!(FOOTER.starts_with("</coordinates>"));
        assert!(FOOTER.ends_with("</kml>"));
    }
}
