use std::collections::HashSet;

use super::column::{parse_cell, Column};
use super::Dataset;
use crate::error::{MonitorError, MonitorResult};

/// Parse CSV text (header row + data rows) into a dataset.
///
/// Quoted fields may contain commas, newlines and `""` escapes. Blank lines
/// are skipped. Every data row must have as many fields as the header.
pub fn parse_csv(input: &str) -> MonitorResult<Dataset> {
    // Excel/Windows exports start with a UTF-8 BOM
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut records = split_records(input)?.into_iter();

    let (_, header) = records.next().ok_or_else(|| MonitorError::MalformedCsv {
        line: 1,
        reason: "missing header row".to_string(),
    })?;
    let header: Vec<String> = header.iter().map(|name| name.trim().to_string()).collect();

    let mut seen = HashSet::new();
    for name in &header {
        if !seen.insert(name.as_str()) {
            return Err(MonitorError::MalformedCsv {
                line: 1,
                reason: format!("duplicate column '{}'", name),
            });
        }
    }

    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::new(); header.len()];

    for (line, record) in records {
        if record.len() != header.len() {
            return Err(MonitorError::MalformedCsv {
                line,
                reason: format!("expected {} fields, found {}", header.len(), record.len()),
            });
        }

        for (idx, field) in record.iter().enumerate() {
            cells[idx].push(parse_cell(field));
        }
    }

    let columns = header
        .into_iter()
        .zip(cells)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();

    Dataset::new(columns)
}

/// Split CSV text into records, each tagged with the line it starts on
fn split_records(input: &str) -> MonitorResult<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();

    let mut in_quotes = false;
    let mut field_quoted = false;
    let mut line = 1;
    let mut record_line = 1;

    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() && !field_quoted => {
                in_quotes = true;
                field_quoted = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_quoted = false;
            }
            '\r' => {}
            '\n' => {
                record.push(std::mem::take(&mut field));
                push_record(&mut records, record_line, std::mem::take(&mut record), field_quoted);
                field_quoted = false;
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(MonitorError::MalformedCsv {
            line: record_line,
            reason: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !record.is_empty() || field_quoted {
        record.push(field);
        push_record(&mut records, record_line, record, field_quoted);
    }

    Ok(records)
}

fn push_record(
    records: &mut Vec<(usize, Vec<String>)>,
    line: usize,
    record: Vec<String>,
    last_quoted: bool,
) {
    // Blank line
    if record.len() == 1 && record[0].trim().is_empty() && !last_quoted {
        return;
    }
    records.push((line, record));
}
