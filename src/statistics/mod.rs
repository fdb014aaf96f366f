//! Server usage statistics report
//!
//! A period filter, a persisted column selection and a table of
//! aggregated records loaded from `/api/statistics`.

pub mod columns;
pub mod filter;
pub mod page;
pub mod report;

pub use columns::{ColumnSelection, StatisticsColumn, ALL_COLUMNS, DEFAULT_COLUMNS};
pub use filter::{custom_range, statistics_query, Period};
pub use page::{PageAction, StatisticsPage};
pub use report::{fetch_statistics, StatisticsReport, StatisticsTable, TableBody, SHIMMER_ROWS};
