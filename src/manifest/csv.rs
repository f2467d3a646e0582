use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::{
    claim::{ExpenseType, ReceiptJob},
    error::Result,
};

/// One manifest row; columns beyond these are ignored
#[derive(Debug, Deserialize)]
struct ManifestRow {
    image_path: String,
    #[serde(default)]
    expense_date: Option<String>,
    #[serde(default)]
    merchant_name: Option<String>,
    #[serde(default)]
    expense_type: Option<String>,
}

/// Read receipt jobs from a CSV manifest with an
/// `image_path,expense_date,merchant_name,expense_type` header.
pub fn read_csv_manifest(path: &Path) -> Result<Vec<ReceiptJob>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;

    let mut jobs = Vec::new();
    for row in reader.deserialize() {
        let row: ManifestRow = row?;
        jobs.push(ReceiptJob {
            image_path: row.image_path.into(),
            expense_date: non_empty(row.expense_date),
            merchant_override: non_empty(row.merchant_name),
            expense_type: row
                .expense_type
                .as_deref()
                .map(ExpenseType::parse_lenient)
                .unwrap_or_default(),
        });
    }

    debug!("Read {} jobs from {}", jobs.len(), path.display());
    Ok(jobs)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn manifest(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_rows_in_order() {
        let file = manifest(
            "image_path,expense_date,merchant_name,expense_type\n\
             receipts/a.jpg,2024-03-01,Acme Corp,parking\n\
             receipts/b.pdf,,,\n\
             receipts/c.png,,Bike Shop,BIKE\n",
        );

        let jobs = read_csv_manifest(file.path()).unwrap();
        assert_eq!(jobs.len(), 3);

        assert_eq!(jobs[0].image_path, Path::new("receipts/a.jpg"));
        assert_eq!(jobs[0].expense_date.as_deref(), Some("2024-03-01"));
        assert_eq!(jobs[0].merchant_override.as_deref(), Some("Acme Corp"));
        assert_eq!(jobs[0].expense_type, ExpenseType::Parking);

        assert_eq!(jobs[1].expense_date, None);
        assert_eq!(jobs[1].merchant_override, None);
        assert_eq!(jobs[1].expense_type, ExpenseType::Transit);

        assert_eq!(jobs[2].expense_type, ExpenseType::Bike);
    }

    #[test]
    fn optional_columns_may_be_missing() {
        let file = manifest("image_path\nonly.jpg\n");
        let jobs = read_csv_manifest(file.path()).unwrap();
        assert_eq!(jobs, vec![ReceiptJob::new("only.jpg", ExpenseType::Transit)]);
    }

    #[test]
    fn missing_image_path_column_is_an_error() {
        let file = manifest("expense_date,merchant_name\n2024-01-01,Shop\n");
        assert!(read_csv_manifest(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_csv_manifest(Path::new("/no/such/manifest.csv")).is_err());
    }
}
