use std::io::Write;
use std::path::Path;

use crate::error::ExportError;
use crate::model::TaskStore;

/// Serialize the store with the header order, names and delimiter it was
/// loaded with. Mapped columns come from the task attributes, the rest are
/// written verbatim. Returns the number of tasks written.
pub fn write_csv<W: Write>(store: &TaskStore, writer: W) -> Result<usize, ExportError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(store.delimiter())
        .from_writer(writer);

    wtr.write_record(store.headers())?;

    for task in store.tasks() {
        let record: Vec<String> = (0..store.headers().len())
            .map(|column| match store.columns().field_at(column) {
                Some(field) => task.field(field),
                None => task.extra.get(&column).cloned().unwrap_or_default(),
            })
            .collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(store.len())
}

/// Export the store to a CSV file.
pub fn export_csv(store: &TaskStore, path: &Path) -> Result<usize, ExportError> {
    let file = std::fs::File::create(path)?;
    let count = write_csv(store, std::io::BufWriter::new(file))?;
    tracing::info!(path = %path.display(), tasks = count, "exported CSV");
    Ok(count)
}
