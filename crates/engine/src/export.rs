use openfund_core::{FieldRegistry, Record};

use crate::error::EngineError;

/// One CSV column: the header label and the registered field it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvColumn {
    pub header: &'static str,
    pub field: &'static str,
}

impl CsvColumn {
    pub const fn new(header: &'static str, field: &'static str) -> Self {
        Self { header, field }
    }
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn push_cell(out: &mut String, cell: &str) {
    if needs_quotes(cell) {
        out.push('"');
        out.push_str(&cell.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(cell);
    }
}

fn push_row(out: &mut String, cells: impl Iterator<Item = String>) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        first = false;
        push_cell(out, &cell);
    }
    out.push('\n');
}

/// Serialize records to CSV in a fixed column order, header row first.
/// A pure function of the matching records, independent of pagination;
/// absent fields render as empty cells.
pub fn to_csv(
    registry: &FieldRegistry,
    records: &[&Record],
    columns: &[CsvColumn],
) -> Result<String, EngineError> {
    // Validate the column set once instead of per row.
    for column in columns {
        registry.get(column.field)?;
    }

    let mut out = String::new();
    push_row(&mut out, columns.iter().map(|c| c.header.to_string()));
    for record in records {
        push_row(
            &mut out,
            columns.iter().map(|c| {
                registry
                    .get(c.field)
                    .ok()
                    .and_then(|d| d.value(record))
                    .map(|v| v.display())
                    .unwrap_or_default()
            }),
        );
    }
    Ok(out)
}
