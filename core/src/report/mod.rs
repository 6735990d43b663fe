pub mod chart;
pub mod summary;

pub use chart::{render_chart, ChartOptions, TerminalSize, TerminalSizeProvider};
pub use summary::render_report;
