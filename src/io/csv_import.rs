use std::path::Path;

use crate::error::LoadError;
use crate::model::store::ColumnMap;
use crate::model::{SourceTable, TaskField};

/// Detect the delimiter from the header line, ignoring quoted text.
fn detect_delimiter(first_line: &str) -> u8 {
    let (mut commas, mut semicolons, mut tabs) = (0usize, 0usize, 0usize);
    let mut quoted = false;
    for c in first_line.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' if !quoted => commas += 1,
            ';' if !quoted => semicolons += 1,
            '\t' if !quoted => tabs += 1,
            _ => {}
        }
    }

    if semicolons > commas && semicolons >= tabs {
        b';'
    } else if tabs > commas {
        b'\t'
    } else {
        b','
    }
}

/// Parse CSV text into a header list and header-aligned rows.
///
/// Auto-detects the delimiter (comma, semicolon, tab), skips blank lines and
/// pads short rows with empty strings. Field values are kept verbatim.
pub fn parse_source(content: &str) -> Result<SourceTable, LoadError> {
    let content = content.trim_start_matches('\u{feff}');
    let first_line = content.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(LoadError::NoHeaders);
    }
    if !ColumnMap::from_headers(&headers).contains(TaskField::Id) {
        return Err(LoadError::MissingColumn(TaskField::Id.label(), headers));
    }

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        if record.iter().all(str::is_empty) && record.len() <= 1 {
            continue;
        }
        if record.len() > headers.len() {
            tracing::debug!(
                line = i + 2,
                fields = record.len(),
                expected = headers.len(),
                "dropping fields beyond the header row"
            );
        }
        let mut row: Vec<String> = record.iter().take(headers.len()).map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(SourceTable {
        headers,
        rows,
        delimiter,
    })
}

/// Read and parse a CSV schedule file.
pub fn import_csv(path: &Path) -> Result<SourceTable, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let table = parse_source(&content)?;
    tracing::info!(
        path = %path.display(),
        rows = table.rows.len(),
        delimiter = %(table.delimiter as char).escape_default(),
        "imported CSV"
    );
    Ok(table)
}
