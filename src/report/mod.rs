pub mod csv_writer;

pub use csv_writer::{Column, CsvReportWriter, COLUMNS, DEFAULT_WEB_HOST};
