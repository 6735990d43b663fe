pub mod config;
pub mod model;
pub mod report;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::{expand_file_name, Settings};
pub use model::day_info::{DayInfo, DayWindow};
pub use model::set::{SetGroup, SetRecord};
pub use report::{render_chart, render_report, ChartOptions, TerminalSize, TerminalSizeProvider};
pub use repository::{FileSetRepository, SetRepository};
pub use service::set_service::SetService;
pub use time::{parse_date, parse_time};
pub use usecase::day_info::build_day_window;
