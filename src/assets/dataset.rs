use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{RivermapError, RivermapResult};

/// Header-addressed table of string fields, as read from a comma separated file.
///
/// Fields are kept verbatim; typing and trimming happen in [`crate::prepare`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<TableRow>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct TableRow {
    line: usize,
    fields: Vec<String>,
}

impl DataTable {
    /// Parse a table from a reader. The first non-blank record is the header.
    pub fn from_reader<R: Read>(mut r: R) -> RivermapResult<Self> {
        let mut text = String::new();
        r.read_to_string(&mut text).context("read dataset")?;
        Self::parse(&text)
    }

    /// Parse a table from a file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> RivermapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open dataset '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a table from in-memory text.
    pub fn parse(text: &str) -> RivermapResult<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut records = split_records(text)?.into_iter();

        let Some(header) = records.next() else {
            return Err(RivermapError::data("dataset has no header row"));
        };
        let columns = header.fields;

        let mut rows = Vec::new();
        for rec in records {
            if rec.fields.len() != columns.len() {
                return Err(RivermapError::data(format!(
                    "line {}: expected {} fields, found {}",
                    rec.line,
                    columns.len(),
                    rec.fields.len()
                )));
            }
            rows.push(rec);
        }

        Ok(Self { columns, rows })
    }

    /// Header names in declared order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of data rows (header excluded).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of `column` in the header, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Field at `row` under `column`.
    pub fn get(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.column_index(column)?;
        self.rows.get(row).map(|r| r.fields[col].as_str())
    }

    /// 1-based source line on which `row` starts.
    pub fn line_of(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(|r| r.line)
    }
}

fn split_records(text: &str) -> RivermapResult<Vec<TableRow>> {
    let mut out = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;
    let mut record_line = 1usize;
    let mut chars = text.chars().peekable();

    let mut finish = |fields: &mut Vec<String>, field: &mut String, at: usize| {
        fields.push(std::mem::take(field));
        let blank = fields.len() == 1 && fields[0].trim().is_empty();
        let done = std::mem::take(fields);
        if !blank {
            out.push(TableRow {
                line: at,
                fields: done,
            });
        }
    };

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
            '"' if field.is_empty() => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                finish(&mut fields, &mut field, record_line);
                line += 1;
                record_line = line;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(RivermapError::data(format!(
            "line {record_line}: unterminated quoted field"
        )));
    }
    if !field.is_empty() || !fields.is_empty() {
        finish(&mut fields, &mut field, record_line);
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/dataset.rs"]
mod tests;
