use crate::core::Record;
use crate::error::{MetaError, Result};

/// Column-union projection of a batch: one row per record, one column per
/// field name seen anywhere in the batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    pub fn from_records(records: &[Record]) -> Self {
        let mut headers: Vec<String> = Vec::new();
        // the identifying column of each platform goes first
        for record in records {
            let url_column = record.platform.url_column();
            if !headers.iter().any(|h| h == url_column) {
                headers.push(url_column.to_string());
            }
        }
        for key in records.iter().flat_map(Record::keys) {
            if !headers.iter().any(|h| h == key) {
                headers.push(key.to_string());
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|h| record.get(h).map(ToString::to_string).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    /// UTF-8 CSV with a header row
    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer
            .into_inner()
            .map_err(|e| MetaError::IoError(e.into_error()))
    }

    /// Aligned plain-text preview, cells clipped to `max_width` characters
    pub fn render(&self, max_width: usize) -> String {
        let clip = |cell: &str| -> String {
            let flat = cell.replace(['\n', '\r'], " ");
            if flat.chars().count() > max_width {
                let kept: String = flat.chars().take(max_width.saturating_sub(1)).collect();
                format!("{kept}…")
            } else {
                flat
            }
        };

        let header: Vec<String> = self.headers.iter().map(|h| clip(h.as_str())).collect();
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(|c| clip(c.as_str())).collect())
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|i| {
                std::iter::once(&header)
                    .chain(body.iter())
                    .map(|row| row[i].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |row: &[String]| {
            row.iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{cell:<w$}", w = *w))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut out = line(header.as_slice());
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for row in &body {
            out.push('\n');
            out.push_str(&line(row.as_slice()));
        }
        out
    }
}
