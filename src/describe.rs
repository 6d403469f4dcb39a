//! Placemark description composition.
//!
//! Builds the human-readable annotation shown in a placemark popup from the
//! optional identity, depth, and position fields of one record. Segment
//! order is fixed; downstream consumers of the KML parse these strings, so
//! the order and separators must not change.

use std::fmt::Write;

use crate::export::fmt_opt_or;
use crate::models::BoreholeRecord;

/// Compose the description string for one record.
///
/// Each segment carries its own separator and is emitted only when its
/// source field is present, so omitted segments never leave a dangling
/// separator. Pure function of the record.
pub fn placemark_description(record: &BoreholeRecord) -> String {
    let mut description = String::new();

    if let Some(hole_id) = &record.hole_id {
        let _ = write!(description, "LacCoreID: {}", hole_id);
    }
    if let Some(original_id) = &record.original_id {
        let _ = write!(description, " / FieldID: {}", original_id);
    }
    if let Some(date) = &record.date {
        let _ = write!(description, " / Date: {}", date);
    }
    if let Some(water_depth) = record.water_depth {
        let _ = write!(description, " / Water Depth: {}m ", water_depth);
    }
    if record.mblf_t.is_some() || record.mblf_b.is_some() {
        // an absent interval bound renders as "?"
        let _ = write!(
            description,
            " / Sediment Depth: {}-{}m",
            fmt_opt_or(record.mblf_t, "?"),
            fmt_opt_or(record.mblf_b, "?")
        );
    }
    if let Some(position) = &record.position {
        let _ = write!(description, " / Position: {}", position);
    }
    if let Some(igsn) = &record.igsn {
        let _ = write!(description, " / IGSN: {}", igsn);
    }
    if let Some(sample_type) = &record.sample_type {
        let _ = write!(description, " / Sample Type: {}", sample_type);
    }

    description
}
