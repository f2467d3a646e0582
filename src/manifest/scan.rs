use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    claim::{ExpenseType, ReceiptJob},
    error::{ClaimError, Result},
};

/// Extensions picked up by a directory scan, in the order they're collected
const RECEIPT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];

/// Collect receipt files directly inside `dir` (no recursion).
///
/// Files are grouped by extension in the order above, sorted within each group.
pub fn scan_directory(dir: &Path, expense_type: ExpenseType) -> Result<Vec<ReceiptJob>> {
    if !dir.is_dir() {
        return Err(ClaimError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("not a directory: {}", dir.display()),
        )));
    }

    let escaped = glob::Pattern::escape(&dir.to_string_lossy());
    let mut jobs = Vec::new();

    for extension in RECEIPT_EXTENSIONS {
        let pattern = format!("{}/*.{}", escaped, extension);
        let paths = glob::glob(&pattern).map_err(|e| anyhow::anyhow!("Invalid pattern: {}", e))?;

        let mut found: Vec<PathBuf> = paths
            .filter_map(|entry| match entry {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|path| path.is_file())
            .collect();
        found.sort();

        jobs.extend(found.into_iter().map(|path| ReceiptJob::new(path, expense_type)));
    }

    debug!("Found {} receipt files in {}", jobs.len(), dir.display());
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn collects_by_extension_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "z.jpg", "doc.pdf", "notes.txt", "c.jpeg"] {
            fs::write(dir.path().join(name), b"x").unwrap();
        }
        fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let jobs = scan_directory(dir.path(), ExpenseType::Parking).unwrap();
        let names: Vec<_> = jobs
            .iter()
            .map(|job| job.image_path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["z.jpg", "c.jpeg", "a.png", "b.png", "doc.pdf"]);
        assert!(jobs.iter().all(|job| job.expense_type == ExpenseType::Parking));
        assert!(jobs.iter().all(|job| job.expense_date.is_none() && job.merchant_override.is_none()));
    }

    #[test]
    fn empty_directory_yields_no_jobs() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_directory(dir.path(), ExpenseType::Transit).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(scan_directory(Path::new("/no/such/dir"), ExpenseType::Transit).is_err());
    }
}
