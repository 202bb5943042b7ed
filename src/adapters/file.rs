// SPDX-License-Identifier: MIT OR Apache-2.0

//! Loading and saving documents from files.
//!
//! This module reads a document file with any [`DocumentFormat`], and writes it back.
//! It also resolves the OS-appropriate default location of an application's
//! configuration file.

use crate::domain::{ConfigError, Result};
use crate::ports::DocumentFormat;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size of a document file (10MB)
const MAX_DOCUMENT_FILE_SIZE: u64 = 10 * 1024 * 1024;

fn file_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}

fn file_error(path: &Path, message: &str, source: Option<std::io::Error>) -> ConfigError {
    ConfigError::FileError {
        path: file_name(path).to_string(),
        message: message.to_string(),
        source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    }
}

/// Reads and parses the document stored at `path`.
///
/// The path is canonicalized and the file size is checked before it is read; files
/// larger than 10MB are rejected.
///
/// # Examples
///
/// ```rust,no_run
/// use safecfg::adapters::{load_document, YamlFormat};
///
/// let document = load_document(&YamlFormat::new(), "/etc/myapp/config.yaml").unwrap();
/// ```
pub fn load_document<F, P>(format: &F, path: P) -> Result<F::Document>
where
    F: DocumentFormat,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let canonical_path = path
        .canonicalize()
        .map_err(|e| file_error(path, "Invalid or inaccessible path", Some(e)))?;

    let metadata = fs::metadata(&canonical_path)
        .map_err(|e| file_error(&canonical_path, "Failed to read file metadata", Some(e)))?;

    if metadata.len() > MAX_DOCUMENT_FILE_SIZE {
        return Err(file_error(
            &canonical_path,
            &format!(
                "Document file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_DOCUMENT_FILE_SIZE
            ),
            None,
        ));
    }

    let content = fs::read_to_string(&canonical_path)
        .map_err(|e| file_error(&canonical_path, "Failed to read document file", Some(e)))?;
    tracing::debug!(
        "Loaded document '{}' ({} bytes)",
        canonical_path.display(),
        content.len()
    );

    format.parse(&content)
}

/// Renders `document` with `format` and writes it to `path`.
///
/// Missing parent directories are created.
pub fn save_document<F, P>(format: &F, document: &F::Document, path: P) -> Result<()>
where
    F: DocumentFormat,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = format.render(document)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| file_error(path, "Failed to create parent directory", Some(e)))?;
        }
    }
    fs::write(path, content)
        .map_err(|e| file_error(path, "Failed to write document file", Some(e)))?;
    tracing::debug!("Saved document '{}'", path.display());
    Ok(())
}

/// Returns the default path of an application's configuration file.
///
/// The directory is the OS-appropriate configuration directory for the application
/// (as resolved by the `directories` crate), joined with `filename`.
///
/// # Examples
///
/// ```rust,no_run
/// use safecfg::adapters::default_location;
///
/// let path = default_location("myapp", "com.example", "config.yaml").unwrap();
/// ```
pub fn default_location(app_name: &str, qualifier: &str, filename: &str) -> Result<PathBuf> {
    let proj_dirs =
        ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| ConfigError::FileError {
            path: filename.to_string(),
            message: "Failed to determine project directories".to_string(),
            source: None,
        })?;

    Ok(proj_dirs.config_dir().join(filename))
}
