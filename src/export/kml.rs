//! KML exporter.
//!
//! Emits one placemark per geolocated record into a single folder, with a
//! shared icon style and the composed description string as the popup body.
//! The document is staged in a temp file next to the destination and
//! persisted into place once fully written.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tempfile::NamedTempFile;
use tracing::debug;

use super::fmt_opt;
use crate::describe::placemark_description;
use crate::models::BoreholeRecord;
use crate::{CollectionError, Result};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";
const DOCUMENT_NAME: &str = "LacCore/CSDCO Core Collection";
const STYLE_ID: &str = "collectionPoint";
const ICON_HREF: &str = "http://maps.google.com/mapfiles/kml/shapes/shaded_dot.png";
const ICON_SCALE: &str = "1.2";
// KML colors are aabbggrr
const ICON_COLOR: &str = "ff0000cc";

/// Write the collection KML to `path`, returning the number of placemarks
///
/// Records missing either coordinate are skipped; they remain in the CSV
/// and HTML outputs.
pub fn export_kml(records: &[BoreholeRecord], path: &Path) -> Result<usize> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged =
        NamedTempFile::new_in(dir).map_err(|e| CollectionError::output_write(path, e))?;

    let placemarks = {
        let mut writer = Writer::new_with_indent(&mut staged, b' ', 2);
        write_document(&mut writer, records)?
    };

    staged
        .flush()
        .map_err(|e| CollectionError::output_write(path, e))?;
    staged
        .persist(path)
        .map_err(|e| CollectionError::output_write(path, e.error))?;

    debug!(
        "Wrote {} placemarks to {} ({} records lacked coordinates)",
        placemarks,
        path.display(),
        records.len() - placemarks
    );
    Ok(placemarks)
}

/// Serialize the full KML document, returning the placemark count
fn write_document<W: Write>(writer: &mut Writer<W>, records: &[BoreholeRecord]) -> Result<usize> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut kml = BytesStart::new("kml");
    kml.push_attribute(("xmlns", KML_NAMESPACE));
    writer.write_event(Event::Start(kml))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;
    text_element(writer, "name", DOCUMENT_NAME)?;
    write_style(writer)?;

    writer.write_event(Event::Start(BytesStart::new("Folder")))?;
    let mut placemarks = 0;
    for record in records {
        let (Some(lat), Some(long)) = (record.lat, record.long) else {
            continue;
        };
        write_placemark(writer, record, lat, long)?;
        placemarks += 1;
    }
    writer.write_event(Event::End(BytesEnd::new("Folder")))?;

    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;
    Ok(placemarks)
}

/// The one icon style shared by every placemark
fn write_style<W: Write>(writer: &mut Writer<W>) -> Result<()> {
    let mut style = BytesStart::new("Style");
    style.push_attribute(("id", STYLE_ID));
    writer.write_event(Event::Start(style))?;
    writer.write_event(Event::Start(BytesStart::new("IconStyle")))?;
    text_element(writer, "color", ICON_COLOR)?;
    text_element(writer, "scale", ICON_SCALE)?;
    writer.write_event(Event::Start(BytesStart::new("Icon")))?;
    text_element(writer, "href", ICON_HREF)?;
    writer.write_event(Event::End(BytesEnd::new("Icon")))?;
    writer.write_event(Event::End(BytesEnd::new("IconStyle")))?;
    writer.write_event(Event::End(BytesEnd::new("Style")))?;
    Ok(())
}

fn write_placemark<W: Write>(
    writer: &mut Writer<W>,
    record: &BoreholeRecord,
    lat: f64,
    long: f64,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    text_element(writer, "name", &fmt_opt(record.location.as_deref()))?;
    text_element(writer, "styleUrl", &format!("#{}", STYLE_ID))?;
    text_element(writer, "description", &placemark_description(record))?;
    writer.write_event(Event::Start(BytesStart::new("Point")))?;
    // longitude leads per the KML coordinate convention
    text_element(writer, "coordinates", &format!("{},{}", long, lat))?;
    writer.write_event(Event::End(BytesEnd::new("Point")))?;
    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn render(records: &[BoreholeRecord]) -> (String, usize) {
        let mut writer = Writer::new(Cursor::new(Vec::new()));
        let placemarks = write_document(&mut writer, records).unwrap();
        let bytes = writer.into_inner().into_inner();
        (String::from_utf8(bytes).unwrap(), placemarks)
    }

    fn located(name: &str, lat: f64, long: f64) -> BoreholeRecord {
        BoreholeRecord {
            location: Some(name.to_string()),
            lat: Some(lat),
            long: Some(long),
            ..Default::default()
        }
    }

    #[test]
    fn coordinates_are_longitude_first() {
        let (kml, placemarks) = render(&[located("Lake Pepin", 45.1, -93.2)]);

        assert_eq!(placemarks, 1);
        assert!(kml.contains("<coordinates>-93.2,45.1</coordinates>"));
        assert!(kml.contains("<name>Lake Pepin</name>"));
    }

    #[test]
    fn records_without_coordinates_are_skipped() {
        let incomplete = BoreholeRecord {
            location: Some("No fix".to_string()),
            long: Some(-93.2),
            ..Default::default()
        };
        let (kml, placemarks) = render(&[located("Lake Pepin", 45.1, -93.2), incomplete]);

        assert_eq!(placemarks, 1);
        assert_eq!(kml.matches("<Placemark>").count(), 1);
        assert!(!kml.contains("No fix"));
    }

    #[test]
    fn document_carries_fixed_name_and_style() {
        let (kml, _) = render(&[located("Lake Pepin", 45.1, -93.2)]);

        assert!(kml.contains("<name>LacCore/CSDCO Core Collection</name>"));
        assert!(kml.contains(r#"<Style id="collectionPoint">"#));
        assert!(kml.contains("<scale>1.2</scale>"));
        assert!(kml.contains("<color>ff0000cc</color>"));
        assert!(kml.contains("<href>http://maps.google.com/mapfiles/kml/shapes/shaded_dot.png</href>"));
        assert!(kml.contains(r#"<styleUrl>#collectionPoint</styleUrl>"#));
    }

    #[test]
    fn description_comes_from_the_composer() {
        let record = BoreholeRecord {
            hole_id: Some("LC001".to_string()),
            sample_type: Some("core".to_string()),
            ..located("Lake Pepin", 45.1, -93.2)
        };
        let (kml, _) = render(&[record]);

        assert!(kml.contains("<description>LacCoreID: LC001 / Sample Type: core</description>"));
    }

    #[test]
    fn export_writes_the_file_in_place() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("collection.kml");

        let placemarks = export_kml(&[located("Lake Pepin", 45.1, -93.2)], &path).unwrap();

        assert_eq!(placemarks, 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(content.contains("<kml xmlns=\"http://www.opengis.net/kml/2.2\">"));
    }
}
