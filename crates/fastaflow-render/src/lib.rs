//! Chart rendering adapter: frequency tables and positional series in,
//! embeddable SVG documents out.

pub mod cache;
pub mod chart;

pub use cache::{charts_for_record, ChartCache, RecordCharts};
pub use chart::{bar_chart, gc_line_chart, pie_chart, RenderedChart};
