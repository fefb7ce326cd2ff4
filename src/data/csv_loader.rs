use csv::{ReaderBuilder, Trim};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::DataSource;
use crate::error::{ChartError, ChartResult};

/// Untyped CSV line: column name → field text, in header order.
pub type RawRow = IndexMap<String, String>;

/// Row accounting for one loaded resource.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadReport {
    pub resource: String,
    pub rows_total: usize,
    /// Rows dropped because the key column was missing or blank.
    pub rows_rejected: usize,
    /// Rows the mapping function declined.
    pub rows_skipped: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub report: LoadReport,
}

/// Parses header-led comma-separated text into raw rows.
///
/// Short rows are tolerated: absent trailing columns read as `""`.
pub fn parse_rows(resource: &str, text: &str) -> ChartResult<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| ChartError::Csv {
            resource: resource.to_owned(),
            source,
        })?
        .iter()
        .map(|header| header.trim_start_matches('\u{feff}').to_owned())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(ChartError::InvalidData(format!(
            "`{resource}` has no header row"
        )));
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| ChartError::Csv {
            resource: resource.to_owned(),
            source,
        })?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .map(|(index, header)| (header.clone(), record.get(index).unwrap_or("").to_owned()))
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Field lookup that treats a missing column as blank.
#[must_use]
pub fn field<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map_or("", String::as_str)
}

/// Splits off rows without a usable key.
#[must_use]
pub fn reject_keyless(rows: Vec<RawRow>, key_column: &str) -> (Vec<RawRow>, usize) {
    let total = rows.len();
    let kept: Vec<RawRow> = rows
        .into_iter()
        .filter(|row| !field(row, key_column).is_empty())
        .collect();
    let rejected = total - kept.len();
    (kept, rejected)
}

/// Async CSV loader over a [`DataSource`].
#[derive(Debug, Clone, Copy)]
pub struct CsvLoader<'a> {
    source: &'a DataSource,
}

impl<'a> CsvLoader<'a> {
    #[must_use]
    pub fn new(source: &'a DataSource) -> Self {
        Self { source }
    }

    pub async fn load_rows(&self, name: &str) -> ChartResult<Loaded<RawRow>> {
        let text = self.source.fetch_text(name).await?;
        let resource = self.source.resolve(name).to_string();
        let rows = parse_rows(&resource, &text)?;
        debug!(%resource, rows = rows.len(), "parsed csv");
        Ok(Loaded {
            report: LoadReport {
                resource,
                rows_total: rows.len(),
                ..LoadReport::default()
            },
            records: rows,
        })
    }

    /// Loads rows and drops every row lacking `key_column`.
    pub async fn load_keyed(&self, name: &str, key_column: &str) -> ChartResult<Loaded<RawRow>> {
        let Loaded { records, mut report } = self.load_rows(name).await?;
        let (records, rejected) = reject_keyless(records, key_column);
        if rejected > 0 {
            warn!(
                resource = %report.resource,
                key_column,
                rejected,
                "rejected rows without key"
            );
        }
        report.rows_rejected = rejected;
        Ok(Loaded { records, report })
    }

    /// Loads keyed rows and maps them into typed records.
    pub async fn load_mapped<T, F>(
        &self,
        name: &str,
        key_column: &str,
        mut map: F,
    ) -> ChartResult<Loaded<T>>
    where
        F: FnMut(&RawRow) -> Option<T>,
    {
        let Loaded { records, mut report } = self.load_keyed(name, key_column).await?;
        let mapped: Vec<T> = records.iter().filter_map(&mut map).collect();
        report.rows_skipped = records.len() - mapped.len();
        if report.rows_skipped > 0 {
            debug!(
                resource = %report.resource,
                skipped = report.rows_skipped,
                "mapping skipped rows"
            );
        }
        Ok(Loaded {
            records: mapped,
            report,
        })
    }
}
