//! Flat-file outputs for a generated model: the block CSV, the run report and a
//! plain-text dump of each z level.

use crate::config::OutputSettings;
use crate::error::Result;
use crate::grid::{Cell, Grid};
use crate::settings::ModelParams;
use crate::summary::ModelSummary;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

const CSV_HEADER: &str = "X,Y,Z,Value,";

/// Write the block CSV. Coordinates are 1-indexed, z outermost and x fastest.
/// Returns the number of data rows written.
pub fn write_model_csv<W: Write>(
    grid: &Grid,
    out: &mut W,
    include_missing: bool,
    precision: usize,
) -> Result<usize> {
    writeln!(out, "{}", CSV_HEADER)?;
    let mut rows = 0;
    for (coord, cell) in grid.iter_export_order() {
        let value = match cell.coded_value() {
            Some(v) => v,
            None if include_missing => Cell::MISSING_VALUE,
            None => continue,
        };
        let (x, y, z) = coord.one_indexed();
        writeln!(out, "{},{},{},{:.*},", x, y, z, precision, value)?;
        rows += 1;
    }
    Ok(rows)
}

/// Write the run report: parameters first, then the seed section
pub fn write_report<W: Write>(
    params: &ModelParams,
    summary: &ModelSummary,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "----MODEL PARAMETERS----")?;
    writeln!(out)?;
    writeln!(out, "Blocks in x: {}", params.dims.x)?;
    writeln!(out, "Blocks in y: {}", params.dims.y)?;
    writeln!(out, "Blocks in z: {}", params.dims.z)?;
    writeln!(out, "Average: {}", params.average)?;
    writeln!(out, "Standard deviation: {}", params.stdev)?;
    writeln!(out, "Max blocks: {}", params.max_blocks)?;
    writeln!(out, "Min blocks: {}", params.min_blocks.unwrap_or(0))?;
    writeln!(out, "Initial code chance: {}", params.code_chance)?;
    writeln!(out, "Direction boost: {}", params.direction_boost)?;
    writeln!(out, "Deposit type: {}", params.deposit.name())?;
    writeln!(out, "Decay rule: {}", params.decay.name())?;
    writeln!(out, "Random seed: {}", summary.rng_seed)?;
    writeln!(out)?;
    writeln!(out, "----SEED INFORMATION----")?;
    writeln!(out)?;
    for line in summary.report_lines() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Print every z level as rows of y, columns of x. Uncoded cells show -1.
pub fn write_slices<W: Write>(grid: &Grid, out: &mut W, precision: usize) -> Result<()> {
    let dims = grid.dims();
    for (coord, cell) in grid.iter_export_order() {
        let value = cell.coded_value().unwrap_or(Cell::MISSING_VALUE);
        write!(out, "{:.*}, ", precision, value)?;
        if coord.x + 1 == dims.x {
            writeln!(out)?;
            if coord.y + 1 == dims.y {
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Write the CSV and report files named in `output`
pub fn write_outputs(
    grid: &Grid,
    params: &ModelParams,
    summary: &ModelSummary,
    output: &OutputSettings,
) -> Result<()> {
    let mut csv = BufWriter::new(File::create(&output.model_path)?);
    let rows = write_model_csv(grid, &mut csv, output.include_missing, output.precision)?;
    csv.flush()?;
    info!(path = %output.model_path.display(), rows, "Wrote model file");

    let mut report = BufWriter::new(File::create(&output.report_path)?);
    write_report(params, summary, &mut report)?;
    report.flush()?;
    info!(path = %output.report_path.display(), "Wrote report file");

    Ok(())
}
