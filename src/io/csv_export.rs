use std::path::Path;

use crate::error::SourceError;
use crate::timeline::RenderModel;

/// Export the utilization strip of every lane to a semicolon-delimited CSV file.
///
/// Columns: Employee ; Bucket ; Percentage ; Severity
/// Returns the number of rows written.
pub fn export_utilization_csv(model: &RenderModel, path: &Path) -> Result<usize, SourceError> {
    let file = std::fs::File::create(path).map_err(|e| SourceError::io(path, e))?;
    let rows = write_utilization(model, file)?;
    Ok(rows)
}

fn write_utilization<W: std::io::Write>(model: &RenderModel, out: W) -> Result<usize, SourceError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(out);

    wtr.write_record(["Employee", "Bucket", "Percentage", "Severity"])?;

    let mut rows = 0;
    for lane in &model.lanes {
        for (bucket, util) in model.grid.buckets().iter().zip(&lane.utilization) {
            wtr.write_record([
                lane.name.as_str(),
                bucket.label().as_str(),
                util.display_percentage().to_string().as_str(),
                util.severity.label(),
            ])?;
            rows += 1;
        }
    }

    wtr.flush().map_err(|e| SourceError::io("<csv>", e))?;
    Ok(rows)
}
