//! Roster CSV loading
//!
//! The published roster uses either English (`Date,Start,End,Name,Code`) or
//! German (`Datum,Beginn,Ende,Name,Dienst`) headers. Column aliases are resolved
//! once per document against [`COLUMN_ALIASES`]; rows are then read by index.

use csv::{ReaderBuilder, StringRecord, Trim};
use shift_board_shared::{RosterRecord, ShiftBoardError, ShiftBoardResult};
use url::Url;

use crate::transport::{HttpGet, HttpTransport};

/// Logical roster columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterField {
    Date,
    Start,
    End,
    Name,
    Code,
}

/// Accepted header names per field, primary first
pub const COLUMN_ALIASES: [(RosterField, &[&str]); 5] = [
    (RosterField::Date, &["Date", "Datum"]),
    (RosterField::Start, &["Start", "Beginn"]),
    (RosterField::End, &["End", "Ende"]),
    (RosterField::Name, &["Name"]),
    (RosterField::Code, &["Code", "Dienst"]),
];

/// Header positions for each field, in alias priority order
#[derive(Debug, Clone, Default)]
struct ColumnMap {
    date: Vec<usize>,
    start: Vec<usize>,
    end: Vec<usize>,
    name: Vec<usize>,
    code: Vec<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Self {
        let mut map = ColumnMap::default();

        for (field, aliases) in COLUMN_ALIASES.iter() {
            let positions: Vec<usize> = aliases
                .iter()
                .filter_map(|alias| headers.iter().position(|h| h == *alias))
                .collect();

            match field {
                RosterField::Date => map.date = positions,
                RosterField::Start => map.start = positions,
                RosterField::End => map.end = positions,
                RosterField::Name => map.name = positions,
                RosterField::Code => map.code = positions,
            }
        }

        map
    }

    /// First non-empty cell among the candidate columns
    fn pick<'r>(row: &'r StringRecord, positions: &[usize]) -> Option<&'r str> {
        positions
            .iter()
            .filter_map(|&idx| row.get(idx))
            .find(|cell| !cell.is_empty())
    }

    fn record(&self, row: &StringRecord) -> Option<RosterRecord> {
        let date = Self::pick(row, &self.date)?;

        Some(RosterRecord::new(
            date,
            Self::pick(row, &self.start),
            Self::pick(row, &self.end),
            Self::pick(row, &self.name).unwrap_or_default(),
            Self::pick(row, &self.code).unwrap_or_default(),
        ))
    }
}

/// Parse roster CSV text. Rows without a date are skipped silently.
pub fn load_roster(csv_text: &str) -> ShiftBoardResult<Vec<RosterRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ShiftBoardError::Parse {
            message: format!("CSV header: {e}"),
        })?
        .clone();
    let columns = ColumnMap::resolve(&headers);

    if columns.date.is_empty() {
        log::warn!("Roster has no date column (headers: {headers:?})");
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in reader.records() {
        let row = row.map_err(|e| ShiftBoardError::Parse {
            message: format!("CSV row: {e}"),
        })?;

        match columns.record(&row) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} roster rows without a date");
    }

    Ok(records)
}

/// Fetches and parses the published roster
pub struct RosterLoader<T> {
    transport: T,
    csv_url: Url,
}

impl<T: HttpTransport> RosterLoader<T> {
    pub fn new(transport: T, csv_url: Url) -> Self {
        Self { transport, csv_url }
    }

    /// Fetch with no-store semantics. Every failure is a `LoadFailure`; there is
    /// no retry.
    pub async fn load(&self) -> ShiftBoardResult<Vec<RosterRecord>> {
        let request = HttpGet::new(self.csv_url.clone()).no_store();

        let response = self
            .transport
            .get(request)
            .await
            .map_err(ShiftBoardError::into_load_failure)?;

        if !response.is_success() {
            return Err(ShiftBoardError::load_failure(format!(
                "CSV HTTP {}",
                response.status
            )));
        }

        let records = load_roster(&response.body).map_err(ShiftBoardError::into_load_failure)?;
        log::info!("Loaded {} roster records", records.len());

        Ok(records)
    }
}
