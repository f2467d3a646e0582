pub mod csv;
pub mod scan;

pub use self::csv::read_csv_manifest;
pub use scan::scan_directory;
