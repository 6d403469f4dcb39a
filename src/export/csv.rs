//! CSV exporter.
//!
//! Writes the full field selection, one row per record in source order. The
//! file leads with a UTF-8 byte-order marker so spreadsheet tools pick up
//! non-ASCII site names correctly.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::fmt_opt;
use crate::models::BoreholeRecord;
use crate::{CollectionError, Result};

/// UTF-8 byte-order marker, written ahead of the header row
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column order of the published CSV
const HEADERS: [&str; 15] = [
    "Location",
    "Country",
    "State_Province",
    "Hole_ID",
    "Original_ID",
    "Date",
    "Water_Depth",
    "Lat",
    "Long",
    "Elevation",
    "Position",
    "Sample_Type",
    "mblf_T",
    "mblf_B",
    "IGSN",
];

/// Write the collection CSV to `path`
///
/// No row is dropped: records missing any field (coordinates included)
/// still get a row, with absent fields rendered empty.
pub fn export_csv(records: &[BoreholeRecord], path: &Path) -> Result<()> {
    let mut file =
        File::create(path).map_err(|e| CollectionError::output_write(path, e))?;
    file.write_all(BOM)
        .map_err(|e| CollectionError::output_write(path, e))?;

    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(HEADERS)?;

    for record in records {
        writer.write_record(&row_fields(record))?;
    }

    writer.flush()?;
    debug!("Wrote {} CSV rows to {}", records.len(), path.display());
    Ok(())
}

/// Render one record in column order
fn row_fields(record: &BoreholeRecord) -> [String; 15] {
    [
        fmt_opt(record.location.as_deref()),
        fmt_opt(record.country.as_deref()),
        fmt_opt(record.state_province.as_deref()),
        fmt_opt(record.hole_id.as_deref()),
        fmt_opt(record.original_id.as_deref()),
        fmt_opt(record.date.as_deref().map(compact_date)),
        fmt_opt(record.water_depth),
        fmt_opt(record.lat),
        fmt_opt(record.long),
        fmt_opt(record.elevation),
        fmt_opt(record.position.as_deref()),
        fmt_opt(record.sample_type.as_deref()),
        fmt_opt(record.mblf_t),
        fmt_opt(record.mblf_b),
        fmt_opt(record.igsn.as_deref()),
    ]
}

/// Collapse "YYYY-MM-DD" to the published "YYYYMMDD" form
fn compact_date(date: &str) -> String {
    date.replace('-', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn read_rows(path: &Path) -> Vec<String> {
        let bytes = std::fs::read(path).unwrap();
        assert!(bytes.starts_with(BOM), "CSV must lead with a UTF-8 BOM");
        String::from_utf8(bytes[BOM.len()..].to_vec())
            .unwrap()
            .lines()
            .map(|line| line.to_string())
            .collect()
    }

    #[test]
    fn writes_header_and_one_row_per_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("collection.csv");

        let records = vec![
            BoreholeRecord {
                location: Some("Lake Pepin".to_string()),
                hole_id: Some("LC001".to_string()),
                date: Some("2021-07-04".to_string()),
                water_depth: Some(18.25),
                lat: Some(45.1),
                long: Some(-93.2),
                ..Default::default()
            },
            BoreholeRecord {
                location: Some("Laguna Llaviucu".to_string()),
                ..Default::default()
            },
        ];

        export_csv(&records, &path).unwrap();
        let rows = read_rows(&path);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            "Location,Country,State_Province,Hole_ID,Original_ID,Date,Water_Depth,\
             Lat,Long,Elevation,Position,Sample_Type,mblf_T,mblf_B,IGSN"
        );
        assert_eq!(
            rows[1],
            "Lake Pepin,,,LC001,,20210704,18.25,45.1,-93.2,,,,,,"
        );
        // a record with only a location still gets a full-width row
        assert_eq!(rows[2], "Laguna Llaviucu,,,,,,,,,,,,,,");
    }

    #[test]
    fn absent_date_yields_empty_field() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("collection.csv");

        let records = vec![BoreholeRecord {
            location: Some("Site".to_string()),
            ..Default::default()
        }];

        export_csv(&records, &path).unwrap();
        let rows = read_rows(&path);
        let fields: Vec<&str> = rows[1].split(',').collect();
        assert_eq!(fields[5], "");
    }

    #[test]
    fn compact_date_strips_hyphens_only() {
        assert_eq!(compact_date("2021-07-04"), "20210704");
        assert_eq!(compact_date("20210704"), "20210704");
    }

    #[test]
    fn non_ascii_locations_survive_the_encoding() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("collection.csv");

        let records = vec![BoreholeRecord {
            location: Some("Lago Cardiel, Patagonia — Perforación".to_string()),
            ..Default::default()
        }];

        export_csv(&records, &path).unwrap();
        let rows = read_rows(&path);
        assert!(rows[1].contains("Perforación"));
    }
}
