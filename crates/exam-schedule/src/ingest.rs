//! CSV tables in and out.
//!
//! The first record is the header and names the columns. Cells are trimmed,
//! a UTF-8 byte-order mark on the first header is ignored, and rows shorter
//! or longer than the header are accepted (missing cells are simply absent
//! from the [`RawRow`]).

use std::io::{Read, Write};

use csv::{ReaderBuilder, Trim, WriterBuilder};
use tracing::debug;

use crate::error::Result;
use crate::row::RawRow;

const BOM: char = '\u{feff}';

/// A parsed schedule sheet: header plus rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|header| header.trim_start_matches(BOM).trim().to_string())
            .collect();

        let mut rows: Vec<RawRow> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(
                headers
                    .iter()
                    .zip(record.iter())
                    .map(|(header, cell)| (header.clone(), cell))
                    .collect(),
            );
        }

        debug!(columns = headers.len(), rows = rows.len(), "read csv table");
        Ok(Self { headers, rows })
    }

    pub fn from_csv_str(csv: &str) -> Result<Self> {
        Self::read(csv.as_bytes())
    }

    /// Write the header and every row; a column missing from a row is
    /// written as an empty cell.
    pub fn write<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = WriterBuilder::new().from_writer(writer);
        csv_writer.write_record(&self.headers)?;
        for row in &self.rows {
            csv_writer.write_record(
                self.headers
                    .iter()
                    .map(|header| row.get(header).unwrap_or_default()),
            )?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write(&mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
