pub mod advisory;
pub mod metric;
pub mod series;
