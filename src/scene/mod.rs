pub mod config;
pub mod records;
