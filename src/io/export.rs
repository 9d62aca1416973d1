//! CSV export for hourly run records.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::runner::HourlyRecord;

/// Column header for the hourly charging log.
const HEADER: &str = "hour,base_load_kw,price,battery_percent,charging,energy_kwh,cost";

/// Exports hourly records to a CSV file at the given path.
///
/// Writes a header row followed by one data row per simulated hour.
/// Produces deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(records: &[HourlyRecord], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(records, buf)
}

/// Writes hourly records as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(records: &[HourlyRecord], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(','))?;

    for r in records {
        wtr.write_record(&[
            r.hour.to_string(),
            format!("{:.2}", r.base_load_kw),
            format!("{:.2}", r.price),
            format!("{:.2}", r.battery_percent),
            r.charging.to_string(),
            format!("{:.2}", r.energy_kwh),
            format!("{:.2}", r.cost),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
