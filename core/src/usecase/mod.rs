pub mod day_info;
