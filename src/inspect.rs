//! Inverse direction: decode a built config back into readable form.

use std::fs;
use std::path::Path;

use crate::document::{DropinEntry, FileEntry, IgnitionDocument, UnitEntry};
use crate::embed::decode_source;
use crate::error::AppError;

const RULE_WIDTH: usize = 88;

/// Read-only view over a built provisioning config.
///
/// The document is re-parsed fresh from disk at construction; nothing here
/// mutates it.
#[derive(Debug)]
pub struct Inspector {
    doc: IgnitionDocument,
}

impl Inspector {
    /// Load and parse the document at `path`. An unreadable file or invalid
    /// JSON is terminal for the inspector instance.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let doc = serde_json::from_str(&raw).map_err(|e| AppError::MalformedDocument {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self { doc })
    }

    /// All file entries, in document order.
    pub fn files(&self) -> impl Iterator<Item = &FileEntry> {
        self.doc.storage.files.iter()
    }

    /// File entries whose path matches one of `paths`.
    pub fn files_by_path<'a>(
        &'a self,
        paths: &'a [String],
    ) -> impl Iterator<Item = &'a FileEntry> {
        self.files().filter(move |file| paths.iter().any(|p| *p == file.path))
    }

    /// All (unit, dropin) pairs, in document order.
    pub fn systemd_dropins(&self) -> impl Iterator<Item = (&UnitEntry, &DropinEntry)> {
        self.doc
            .systemd
            .units
            .iter()
            .flat_map(|unit| unit.dropins.iter().map(move |dropin| (unit, dropin)))
    }

    /// Dropins belonging to one of the named units.
    pub fn systemd_dropins_by_unit<'a>(
        &'a self,
        units: &'a [String],
    ) -> impl Iterator<Item = (&'a UnitEntry, &'a DropinEntry)> {
        self.systemd_dropins()
            .filter(move |(unit, _)| units.iter().any(|name| *name == unit.name))
    }

    /// Decode a file entry's embedded or referenced content.
    pub fn decode_file_content(&self, file: &FileEntry) -> Result<String, AppError> {
        decode_source(file.source().unwrap_or(""))
    }

    /// Render one file entry as the CLI prints it: path and octal mode,
    /// separator rule, decoded content, trailing rule.
    pub fn format_file(&self, file: &FileEntry) -> Result<String, AppError> {
        let mode = file
            .mode
            .map(|m| format!("{m:o}"))
            .unwrap_or_else(|| "?".to_string());
        let content = self.decode_file_content(file)?;
        Ok(format!(
            "{} (mode: {})\n{}\n{}\n{}\n\n",
            file.path,
            mode,
            "=".repeat(RULE_WIDTH),
            content,
            "-".repeat(RULE_WIDTH),
        ))
    }

    /// Render one dropin as the CLI prints it. Contents are raw plaintext.
    pub fn format_dropin(&self, unit: &UnitEntry, dropin: &DropinEntry) -> String {
        let contents = if dropin.contents.is_empty() {
            "No contents available."
        } else {
            &dropin.contents
        };
        format!(
            "Unit: {}, Dropin: {}\n{}\n{}\n{}\n\n",
            unit.name,
            dropin.name,
            "=".repeat(RULE_WIDTH),
            contents,
            "-".repeat(RULE_WIDTH),
        )
    }
}

/// Strip a literal `files` prefix segment from a user-supplied filter path,
/// so `files/etc/x` matches the entry path `/etc/x`.
pub fn strip_files_prefix(path: &str) -> &str {
    path.strip_prefix("files").unwrap_or(path)
}
