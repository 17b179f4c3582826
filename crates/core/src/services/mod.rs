pub mod advisory;
pub mod aggregator;
pub mod series;
