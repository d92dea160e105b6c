//! Service layer for the dashboard data pipeline.
//!
//! - [`fetcher`]: indicator source client
//! - [`aggregator`]: pure merge of the two indicator lists
//! - [`dashboard`]: concurrent fetch plus merge for one request

pub mod aggregator;
pub mod dashboard;
pub mod fetcher;

pub use aggregator::{merge, merge_with_policy, DuplicateYears};
pub use dashboard::{load_dashboard, DashboardError};
pub use fetcher::{FetchError, IndicatorSource, WorldBankClient};
