//! CSV export for dispatch ledgers.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::result::SimulationResult;

/// Schema v1 column header for ledger export.
const HEADER: &str = "capacity_kwh,hour,period,demand_kwh,charged_kwh,\
                      from_storage_kwh,from_grid_kwh,level_kwh,grid_cost,\
                      sell_price,cost_cum,revenue_cum,profit_cum";

/// Exports dispatch ledgers to a CSV file at the given path.
///
/// Writes a header row followed by one data row per simulated hour, with
/// whole runs concatenated in input order. Produces deterministic output
/// for identical inputs.
///
/// # Arguments
///
/// * `results` - Completed simulation runs, one per battery capacity
/// * `path` - Output file path
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_ledger_csv(
    results: &[SimulationResult],
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_ledger_csv(results, buf)
}

/// Writes dispatch ledgers as CSV to any writer.
///
/// # Arguments
///
/// * `results` - Completed simulation runs, one per battery capacity
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_ledger_csv(
    results: &[SimulationResult],
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    // Header
    wtr.write_record(HEADER.split(',').map(str::trim))?;

    // Data rows, capacity-major
    for result in results {
        for r in result.ledger() {
            wtr.write_record(&[
                format!("{:.1}", result.capacity_kwh()),
                r.hour.to_string(),
                r.period.to_string(),
                format!("{:.4}", r.demand_kwh),
                format!("{:.4}", r.charged_kwh),
                format!("{:.4}", r.from_storage_kwh),
                format!("{:.4}", r.from_grid_kwh),
                format!("{:.4}", r.level_kwh),
                format!("{:.4}", r.grid_cost),
                format!("{:.4}", r.sell_price),
                format!("{:.4}", r.cumulative_cost),
                format!("{:.4}", r.cumulative_revenue),
                format!("{:.4}", r.cumulative_profit),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
