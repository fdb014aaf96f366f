//! Statistics report state and table model

use chrono::{DateTime, FixedOffset, Utc};
use serde_json::Value;
use tracing::{debug, warn};

use super::columns::{ColumnSelection, StatisticsColumn};
use crate::api::{StatisticsRecord, TrackerApi};
use crate::error::ApiResult;
use crate::format::{format_time, TimeStyle};

/// Placeholder rows drawn while a request is in flight
pub const SHIMMER_ROWS: usize = 3;

/// Loaded records plus request bookkeeping
///
/// Submissions are neither cancelled nor coalesced. Each completion
/// replaces the items, so the last one to arrive wins, and the report
/// stays loading until every submission has completed.
#[derive(Debug, Default)]
pub struct StatisticsReport {
    items: Vec<StatisticsRecord>,
    in_flight: usize,
    error: Option<String>,
}

/// Rendered table content
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsTable {
    pub header: Vec<String>,
    pub body: TableBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// Loading placeholder of `rows` by `columns` cells
    Shimmer { rows: usize, columns: usize },
    /// One row per record, one cell per selected column
    Rows(Vec<Vec<String>>),
}

/// Fetches statistics for a range
///
/// # Errors
///
/// Returns the backend error; its display text is the response body
pub async fn fetch_statistics<A: TrackerApi>(
    api: &A,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> ApiResult<Vec<StatisticsRecord>> {
    debug!("Fetching statistics {} - {}", from, to);
    api.statistics(from, to).await
}

impl StatisticsReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a submission as started
    pub fn begin(&mut self) {
        self.in_flight += 1;
    }

    /// Applies a completed submission
    ///
    /// On failure the previous items stay and the error text is returned
    /// for display.
    pub fn finish(&mut self, result: ApiResult<Vec<StatisticsRecord>>) -> Option<String> {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(items) => {
                debug!("Loaded {} statistics records", items.len());
                self.items = items;
                self.error = None;
                None
            }
            Err(e) => {
                warn!("Statistics request failed: {}", e);
                let message = e.to_string();
                self.error = Some(message.clone());
                Some(message)
            }
        }
    }

    /// Runs one full submission against the API
    pub async fn load<A: TrackerApi>(&mut self, api: &A, from: DateTime<Utc>, to: DateTime<Utc>) -> Option<String> {
        self.begin();
        let result = fetch_statistics(api, from, to).await;
        self.finish(result)
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn items(&self) -> &[StatisticsRecord] {
        &self.items
    }

    /// Text of the most recent failure, cleared by the next success
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Builds the table for the selected columns
    pub fn table(
        &self,
        columns: &ColumnSelection,
        hours12: bool,
        offset: FixedOffset,
        translate: fn(&'static str) -> &'static str,
    ) -> StatisticsTable {
        let header = columns
            .columns()
            .iter()
            .map(|column| translate(column.label_key()).to_string())
            .collect();

        let body = if self.is_loading() {
            TableBody::Shimmer {
                rows: SHIMMER_ROWS,
                columns: columns.columns().len(),
            }
        } else {
            TableBody::Rows(
                self.items
                    .iter()
                    .map(|record| {
                        columns
                            .columns()
                            .iter()
                            .map(|column| cell(*column, record, hours12, offset))
                            .collect()
                    })
                    .collect(),
            )
        };

        StatisticsTable { header, body }
    }
}

fn cell(column: StatisticsColumn, record: &StatisticsRecord, hours12: bool, offset: FixedOffset) -> String {
    match column {
        StatisticsColumn::CaptureTime => {
            format_time(record.capture_time.as_ref(), TimeStyle::Minutes, hours12, offset)
        }
        other => other.value(record).map(raw_value).unwrap_or_default(),
    }
}

fn raw_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
