use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::Dataset;
use crate::error::MonitorResult;

/// Write dataset as CSV. Missing cells are written as empty fields.
pub fn write_csv(dataset: &Dataset, path: &Path) -> MonitorResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut out = BufWriter::new(File::create(path)?);

    let header: Vec<String> = dataset.column_names().into_iter().map(escape_field).collect();
    writeln!(out, "{}", header.join(","))?;

    for row in 0..dataset.n_rows() {
        let fields: Vec<String> = dataset
            .columns()
            .iter()
            .map(|col| col.cells()[row].as_deref().map(escape_field).unwrap_or_default())
            .collect();
        writeln!(out, "{}", fields.join(","))?;
    }

    out.flush()?;
    log::info!("Wrote {} rows to {:?}", dataset.n_rows(), path);
    Ok(())
}

/// Quote a field when it contains separators, quotes, or edge whitespace
fn escape_field(value: &str) -> String {
    let needs_quotes = value.contains([',', '"', '\n', '\r'])
        || value.starts_with(' ')
        || value.ends_with(' ');

    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
