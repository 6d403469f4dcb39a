//! Workbook loading for the Holes collection.
//!
//! Opens the input workbook read-only, maps its header row onto the fixed
//! record schema, and materializes every data row into [`BoreholeRecord`]s.
//! A cell that cannot be interpreted as its field's type loads as absent
//! rather than failing the run; the loader counts such cells so the summary
//! can surface how much data was dropped.

use std::collections::HashMap;
use std::path::Path;

use calamine::{open_workbook, DataType, Reader, Xlsx};
use tracing::{debug, warn};

use crate::models::BoreholeRecord;
use crate::{CollectionError, Result};

/// Result of materializing the workbook
#[derive(Debug)]
pub struct LoadResult {
    /// Records in sheet order
    pub records: Vec<BoreholeRecord>,
    /// Cells that failed type interpretation and were loaded as absent
    pub malformed_cells: usize,
}

/// Column mapping from the sheet's header row to the record schema
///
/// Header spellings are canonicalized before matching so the legacy
/// spreadsheet headers ("Hole ID", "Water Depth (m)", "mblf T") and the
/// schema field names ("Hole_ID", "Water_Depth", "mblf_T") both resolve.
#[derive(Debug, Clone)]
pub struct ColumnMapping {
    name_to_index: HashMap<String, usize>,
}

impl ColumnMapping {
    /// Analyze a header row; the Location column is required
    pub fn analyze(headers: &[DataType]) -> Result<Self> {
        let mut name_to_index = HashMap::new();

        for (index, header) in headers.iter().enumerate() {
            if let Some(raw) = cell_to_string(header) {
                let name = canonical_name(&raw);
                if !name.is_empty() {
                    // first occurrence wins on duplicate headers
                    name_to_index.entry(name).or_insert(index);
                }
            }
        }

        let mapping = ColumnMapping { name_to_index };
        if !mapping.has_column("location") {
            return Err(CollectionError::MissingColumn {
                column: "Location".to_string(),
            });
        }

        Ok(mapping)
    }

    /// Get the index for a given schema field name
    pub fn get_index(&self, field: &str) -> Option<usize> {
        self.name_to_index.get(field).copied()
    }

    /// Check if a field is present in the mapping
    pub fn has_column(&self, field: &str) -> bool {
        self.name_to_index.contains_key(field)
    }

    fn cell<'a>(&self, row: &'a [DataType], field: &str) -> Option<&'a DataType> {
        self.get_index(field).and_then(|index| row.get(index))
    }
}

/// Load all records from the first worksheet of the Holes workbook
pub fn load_records(path: &Path) -> Result<LoadResult> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| CollectionError::Workbook {
        path: path.to_path_buf(),
        source: e,
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CollectionError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| CollectionError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|e| CollectionError::Workbook {
            path: path.to_path_buf(),
            source: e,
        })?;

    let mut rows = range.rows();
    let headers = rows.next().unwrap_or(&[]);
    let mapping = ColumnMapping::analyze(headers)?;
    debug!(
        "Mapped {} columns from sheet '{}'",
        headers.len(),
        sheet_name
    );

    let mut records = Vec::new();
    let mut malformed_cells = 0;

    for row in rows {
        // rows with no populated cells are spreadsheet padding, not records
        if row.iter().all(|cell| matches!(cell, DataType::Empty)) {
            continue;
        }
        records.push(record_from_row(row, &mapping, &mut malformed_cells));
    }

    if malformed_cells > 0 {
        warn!(
            "{} cells could not be interpreted as their field's type and were loaded as absent",
            malformed_cells
        );
    }
    debug!(
        "Materialized {} records from {}",
        records.len(),
        path.display()
    );

    Ok(LoadResult {
        records,
        malformed_cells,
    })
}

/// Build one record from a data row, counting uninterpretable cells
fn record_from_row(
    row: &[DataType],
    mapping: &ColumnMapping,
    malformed: &mut usize,
) -> BoreholeRecord {
    BoreholeRecord {
        location: mapping.cell(row, "location").and_then(cell_to_string),
        country: mapping.cell(row, "country").and_then(cell_to_string),
        state_province: mapping.cell(row, "state_province").and_then(cell_to_string),
        hole_id: mapping.cell(row, "hole_id").and_then(cell_to_string),
        original_id: mapping.cell(row, "original_id").and_then(cell_to_string),
        date: mapping
            .cell(row, "date")
            .and_then(|cell| cell_to_date(cell, malformed)),
        water_depth: mapping
            .cell(row, "water_depth")
            .and_then(|cell| cell_to_f64(cell, malformed)),
        lat: mapping
            .cell(row, "lat")
            .and_then(|cell| cell_to_f64(cell, malformed)),
        long: mapping
            .cell(row, "long")
            .and_then(|cell| cell_to_f64(cell, malformed)),
        elevation: mapping
            .cell(row, "elevation")
            .and_then(|cell| cell_to_f64(cell, malformed)),
        position: mapping.cell(row, "position").and_then(cell_to_string),
        sample_type: mapping.cell(row, "sample_type").and_then(cell_to_string),
        mblf_t: mapping
            .cell(row, "mblf_t")
            .and_then(|cell| cell_to_f64(cell, malformed)),
        mblf_b: mapping
            .cell(row, "mblf_b")
            .and_then(|cell| cell_to_f64(cell, malformed)),
        igsn: mapping.cell(row, "igsn").and_then(cell_to_string),
    }
}

/// Canonicalize a header: strip parenthesized qualifiers, lowercase, and
/// collapse separators, so "Water Depth (m)" and "Water_Depth" both map to
/// `water_depth`
fn canonical_name(header: &str) -> String {
    let base = header.split('(').next().unwrap_or(header);

    let mut name = String::new();
    for c in base.trim().chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
        } else if !name.is_empty() && !name.ends_with('_') {
            name.push('_');
        }
    }
    let name = name.trim_end_matches('_').to_string();

    match name.as_str() {
        "latitude" => "lat".to_string(),
        "longitude" => "long".to_string(),
        _ => name,
    }
}

/// Coerce a cell to a non-empty trimmed string
fn cell_to_string(cell: &DataType) -> Option<String> {
    match cell {
        DataType::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        DataType::Int(i) => Some(i.to_string()),
        DataType::Float(f) => Some(f.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Coerce a cell to a float; unparseable content counts as malformed
fn cell_to_f64(cell: &DataType, malformed: &mut usize) -> Option<f64> {
    match cell {
        DataType::Float(f) => Some(*f),
        DataType::Int(i) => Some(*i as f64),
        DataType::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                match trimmed.parse::<f64>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        *malformed += 1;
                        None
                    }
                }
            }
        }
        DataType::Empty => None,
        _ => {
            *malformed += 1;
            None
        }
    }
}

/// Coerce a cell to a "YYYY-MM-DD" date string
///
/// String cells pass through as-is; native datetime cells are rendered via
/// chrono; anything else counts as malformed.
fn cell_to_date(cell: &DataType, malformed: &mut usize) -> Option<String> {
    match cell {
        DataType::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        DataType::Empty => None,
        other => match other.as_datetime() {
            Some(dt) => Some(dt.format("%Y-%m-%d").to_string()),
            None => {
                *malformed += 1;
                None
            }
        },
    }
}
