pub mod day_info;
pub mod set;
