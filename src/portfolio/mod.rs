mod aggregator;

pub use aggregator::{summarize, FetchWindow, PerformanceAggregator};
