//! Output path derivation
//!
//! File names are built from the export kind and the filter values in effect.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::core::filter::FilterCriteria;
use crate::core::render::OutputFormat;

/// Base name of the organization listing
pub const ORGANIZATIONS_BASE: &str = "gsoc_organizations";

/// Base name of the student export
pub const STUDENTS_BASE: &str = "gsoc_students";

/// Runs of characters that may not appear in a file name component
static UNSAFE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9.\-]+").expect("Invalid UNSAFE_RE regex"));

/// Replace unsafe characters (spaces, separators, ...) with '_'
pub fn sanitize_component(value: &str) -> String {
    UNSAFE_RE
        .replace_all(value, "_")
        .trim_matches('_')
        .to_string()
}

/// `gsoc_organizations_{year}.{ext}`
pub fn organizations_file_name(year: i32, format: OutputFormat) -> String {
    format!("{}_{}.{}", ORGANIZATIONS_BASE, year, format.extension())
}

/// `gsoc_students[_{value}...].{ext}` from the non-empty criteria
pub fn students_file_name(criteria: &FilterCriteria, format: OutputFormat) -> String {
    let mut parts = vec![STUDENTS_BASE.to_string()];
    parts.extend(
        criteria
            .values()
            .map(sanitize_component)
            .filter(|part| !part.is_empty()),
    );
    format!("{}.{}", parts.join("_"), format.extension())
}

/// An explicit output path wins; otherwise the derived name goes under `out_dir`
pub fn resolve_output(out_dir: &Path, explicit: Option<&Path>, derived: &str) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => out_dir.join(derived),
    }
}
