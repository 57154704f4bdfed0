//! Selection state: the chosen company and the attached documents.

use bytes::Bytes;

use crate::models::Company;

/// Number of files the page suggests attaching. Advisory only: selections
/// above it are flagged but still submitted in full.
pub const SUGGESTED_MAX_FILES: usize = 5;

/// A document picked by the user, held in memory until submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl AttachedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    company: Company,
    files: Vec<AttachedFile>,
}

impl Selection {
    pub fn company(&self) -> Company {
        self.company
    }

    pub fn files(&self) -> &[AttachedFile] {
        &self.files
    }

    pub fn set_company(&mut self, company: Company) {
        self.company = company;
    }

    /// Replaces the attached files wholesale. An empty list is accepted.
    pub fn set_files(&mut self, files: Vec<AttachedFile>) {
        self.files = files;
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn exceeds_guidance(&self) -> bool {
        self.files.len() > SUGGESTED_MAX_FILES
    }

    pub fn total_bytes(&self) -> usize {
        self.files.iter().map(AttachedFile::size).sum()
    }
}

#[cfg(test)]
pub(crate) fn file(name: &str, body: &'static [u8]) -> AttachedFile {
    AttachedFile::new(
        name,
        Some("application/pdf".to_string()),
        Bytes::from_static(body),
    )
}
