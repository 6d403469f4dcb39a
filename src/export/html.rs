//! HTML table-fragment exporter.
//!
//! Emits one `<tr>` line per record for inclusion in the collection page;
//! the output is a raw fragment, not a complete document. Elevation is
//! rounded to a whole number for display only.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use super::fmt_opt;
use crate::models::BoreholeRecord;
use crate::{CollectionError, Result};

/// Write the collection HTML fragment to `path`
pub fn export_html(records: &[BoreholeRecord], path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| CollectionError::output_write(path, e))?;
    let mut writer = BufWriter::new(file);

    for record in records {
        writeln!(writer, "{}", table_row(record))?;
    }

    writer.flush()?;
    debug!("Wrote {} HTML rows to {}", records.len(), path.display());
    Ok(())
}

/// Render one record as a table row
fn table_row(record: &BoreholeRecord) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        fmt_opt(record.location.as_deref()),
        fmt_opt(record.lat),
        fmt_opt(record.long),
        fmt_opt(record.elevation.map(|v| v.round() as i64)),
        fmt_opt(record.igsn.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn renders_populated_row() {
        let record = BoreholeRecord {
            location: Some("Lake Pepin".to_string()),
            lat: Some(45.1),
            long: Some(-93.2),
            elevation: Some(288.7),
            igsn: Some("IEJEN0001".to_string()),
            ..Default::default()
        };

        assert_eq!(
            table_row(&record),
            "<tr><td>Lake Pepin</td><td>45.1</td><td>-93.2</td>\
             <td>289</td><td>IEJEN0001</td></tr>"
        );
    }

    #[test]
    fn absent_fields_render_as_empty_cells() {
        let record = BoreholeRecord::default();

        assert_eq!(
            table_row(&record),
            "<tr><td></td><td></td><td></td><td></td><td></td></tr>"
        );
    }

    #[test]
    fn elevation_rounding_is_display_only() {
        let record = BoreholeRecord {
            elevation: Some(288.4),
            ..Default::default()
        };

        assert_eq!(
            table_row(&record),
            "<tr><td></td><td></td><td></td><td>288</td><td></td></tr>"
        );
        // the record itself keeps full precision
        assert_eq!(record.elevation, Some(288.4));
    }

    #[test]
    fn writes_one_line_per_record() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("collection.txt");

        let records = vec![
            BoreholeRecord {
                location: Some("A".to_string()),
                ..Default::default()
            },
            BoreholeRecord {
                location: Some("B".to_string()),
                ..Default::default()
            },
        ];

        export_html(&records, &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("<tr><td>A</td>"));
        assert!(lines[1].starts_with("<tr><td>B</td>"));
        assert!(content.ends_with('\n'));
    }
}
