pub mod csv_format;
pub mod csv_file;
pub mod spreadsheet;
pub mod static_list;
pub mod traits;
