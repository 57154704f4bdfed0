//! Export of an analysis report as a downloadable JSON file.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::models::AnalysisResult;

pub const EXPORT_EXTENSION: &str = "json";
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub file_name: String,
    pub contents: String,
}

/// Serializes the report pretty-printed, keys in field order, named
/// `<ticker>_analysis_<run_id>.json`.
pub fn export_as_file(result: &AnalysisResult) -> serde_json::Result<ExportFile> {
    Ok(ExportFile {
        file_name: export_file_name(result),
        contents: serde_json::to_string_pretty(result)?,
    })
}

pub fn export_file_name(result: &AnalysisResult) -> String {
    format!(
        "{}_analysis_{}.{EXPORT_EXTENSION}",
        file_name_safe(&result.ticker),
        file_name_safe(&result.run_id)
    )
}

// Service-provided ids end up in a header and on disk.
fn file_name_safe(part: &str) -> String {
    part.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl ExportFile {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.file_name)
    }

    /// Writes the export into `dir` through a staging file. The staging file
    /// is removed on every path that does not end in the final rename.
    pub fn write_into(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(self.contents.as_bytes())?;
        staged.flush()?;

        let target = dir.join(&self.file_name);
        staged.persist(&target).map_err(|e| e.error)?;
        Ok(target)
    }
}
