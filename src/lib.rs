pub mod config;
pub mod report;
pub mod stats;
pub mod table;

pub use config::ReportConfig;
pub use report::{run, Report};
pub use stats::{count_distinct, count_rows, difference, Participation};
pub use table::{load_table, BadRowPolicy, ReadOptions, Table, TableError};
