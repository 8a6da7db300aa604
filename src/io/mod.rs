use std::path::Path;

use log::info;

use crate::error::Result;
use crate::types::{GroupRow, Record};

/// Read input records from a CSV file with `Name` and `Address` header
/// columns. Any read or parse failure is returned to the caller; a missing
/// input file is the one fatal condition of the whole run.
pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        let record: Record = record?;
        records.push(record);
    }
    info!("Read {} records from {:?}", records.len(), path.as_ref());
    Ok(records)
}

/// Write grouped rows as `;`-separated CSV with no header: one row per
/// cluster, containing only the joined-names column.
pub fn write_groups<P: AsRef<Path>>(path: P, rows: &[GroupRow]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path.as_ref())?;
    for row in rows {
        writer.write_record([row.names.as_str()])?;
    }
    writer.flush()?;
    info!("Wrote {} grouped rows to {:?}", rows.len(), path.as_ref());
    Ok(())
}
