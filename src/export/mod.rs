//! export
//!
//! Writing analysis results to files.
//!
//! # Modules
//!
//! - [`xlsx`] - Spreadsheet with conditional highlight bands
//!
//! File naming lives here: the default name is `Jira <dd.mm.YYYY>.xlsx`, and
//! an explicit name without the `.xlsx` extension gets it appended.

pub mod xlsx;

pub use xlsx::write_xlsx;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use thiserror::Error;

/// Extension every exported spreadsheet carries.
pub const XLSX_EXTENSION: &str = "xlsx";

/// Errors from export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Default spreadsheet name for a given day.
///
/// ```
/// use chrono::NaiveDate;
/// use jiratrack::export::default_file_name;
///
/// let day = NaiveDate::from_ymd_opt(2020, 7, 21).unwrap();
/// assert_eq!(default_file_name(day), "Jira 21.07.2020.xlsx");
/// ```
pub fn default_file_name(day: NaiveDate) -> String {
    format!("Jira {}.{}", day.format("%d.%m.%Y"), XLSX_EXTENSION)
}

/// Append `.xlsx` unless the path already ends with it.
pub fn with_xlsx_extension(path: &Path) -> PathBuf {
    let has_extension = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(XLSX_EXTENSION));
    if has_extension {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".");
        name.push(XLSX_EXTENSION);
        PathBuf::from(name)
    }
}

/// Work out where the spreadsheet goes.
///
/// An explicit `output` wins (relative paths stay relative to the current
/// directory); otherwise the default name for `today` is placed in
/// `directory`, or the current directory when that is unset.
pub fn resolve_output_path(
    output: Option<&Path>,
    directory: Option<&Path>,
    today: NaiveDate,
) -> PathBuf {
    match output {
        Some(path) => with_xlsx_extension(path),
        None => {
            let name = default_file_name(today);
            match directory {
                Some(dir) => dir.join(name),
                None => PathBuf::from(name),
            }
        }
    }
}

/// Create the parent directory of `path` if it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ExportError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent).map_err(|e| ExportError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, 1, 5).unwrap()
    }

    #[test]
    fn default_name_is_zero_padded() {
        assert_eq!(default_file_name(day()), "Jira 05.01.2021.xlsx");
    }

    #[test]
    fn extension_appended_when_missing() {
        assert_eq!(
            with_xlsx_extension(Path::new("report")),
            PathBuf::from("report.xlsx")
        );
        assert_eq!(
            with_xlsx_extension(Path::new("report.v2")),
            PathBuf::from("report.v2.xlsx")
        );
        assert_eq!(
            with_xlsx_extension(Path::new("out/report.XLSX")),
            PathBuf::from("out/report.XLSX")
        );
    }

    #[test]
    fn explicit_output_wins() {
        let path = resolve_output_path(Some(Path::new("mine")), Some(Path::new("/reports")), day());
        assert_eq!(path, PathBuf::from("mine.xlsx"));
    }

    #[test]
    fn default_name_placed_in_directory() {
        let path = resolve_output_path(None, Some(Path::new("/reports")), day());
        assert_eq!(path, PathBuf::from("/reports/Jira 05.01.2021.xlsx"));

        let path = resolve_output_path(None, None, day());
        assert_eq!(path, PathBuf::from("Jira 05.01.2021.xlsx"));
    }

    #[test]
    fn parent_directory_created() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/report.xlsx");

        ensure_parent_dir(&path).unwrap();
        assert!(temp.path().join("a/b").is_dir());

        // bare file names have an empty parent
        ensure_parent_dir(Path::new("report.xlsx")).unwrap();
    }
}
