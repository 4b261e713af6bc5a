//! Name sanitization and output path helpers

use crate::config::FileCollisionAction;
use crate::error::{ArchiveError, Error, Result};
use std::path::{Path, PathBuf};

/// Characters that are replaced in record names before they become file or folder names
pub const UNSAFE_NAME_CHARS: [char; 10] = ['/', '\\', '?', '%', '*', ':', '|', '"', '<', '>'];

/// Replacement for every unsafe character
pub const NAME_REPLACEMENT: char = '_';

/// Maximum number of numbered candidates tried when resolving a collision
const MAX_RENAME_ATTEMPTS: u32 = 9999;

/// Make a record display name safe to use as a folder and archive name
///
/// Each of `/ \ ? % * : | " < >` becomes `_`; every other character,
/// including whitespace and non-ASCII text, is kept as is.
///
/// # Examples
///
/// ```
/// use record_zip_dl::utils::sanitize_record_name;
///
/// assert_eq!(sanitize_record_name("Acme/Invoices: Q1"), "Acme_Invoices_ Q1");
/// assert_eq!(sanitize_record_name("Café"), "Café");
/// ```
#[must_use]
pub fn sanitize_record_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if UNSAFE_NAME_CHARS.contains(&c) {
                NAME_REPLACEMENT
            } else {
                c
            }
        })
        .collect()
}

/// Resolve where a saved file should land, honouring the collision policy
///
/// * `Overwrite` - always the requested path
/// * `Skip` - the requested path, or an error if it already exists
/// * `Rename` - the requested path, or the first free `name (n).ext`
///
/// # Examples
///
/// ```
/// use record_zip_dl::utils::get_unique_path;
/// use record_zip_dl::config::FileCollisionAction;
/// use std::path::Path;
///
/// let path = Path::new("/nonexistent-dir/Acme.zip");
/// let unique = get_unique_path(path, FileCollisionAction::Rename).unwrap();
/// assert_eq!(unique, path);
/// ```
pub fn get_unique_path(path: &Path, action: FileCollisionAction) -> Result<PathBuf> {
    match action {
        FileCollisionAction::Overwrite => Ok(path.to_path_buf()),
        FileCollisionAction::Skip if path.exists() => {
            Err(Error::Archive(ArchiveError::FileCollision {
                path: path.to_path_buf(),
                reason: "file already exists and collision action is skip".to_string(),
            }))
        }
        FileCollisionAction::Skip => Ok(path.to_path_buf()),
        FileCollisionAction::Rename if !path.exists() => Ok(path.to_path_buf()),
        FileCollisionAction::Rename => {
            let stem = path.file_stem().and_then(|s| s.to_str()).ok_or_else(|| {
                Error::Archive(ArchiveError::InvalidPath {
                    path: path.to_path_buf(),
                    reason: "cannot extract file stem".to_string(),
                })
            })?;
            let extension = path.extension().and_then(|e| e.to_str());
            let parent = path.parent().unwrap_or_else(|| Path::new(""));

            (1..=MAX_RENAME_ATTEMPTS)
                .map(|n| parent.join(numbered_name(stem, extension, n)))
                .find(|candidate| !candidate.exists())
                .ok_or_else(|| {
                    Error::Archive(ArchiveError::FileCollision {
                        path: path.to_path_buf(),
                        reason: format!(
                            "no free file name after {MAX_RENAME_ATTEMPTS} attempts"
                        ),
                    })
                })
        }
    }
}

fn numbered_name(stem: &str, extension: Option<&str>, n: u32) -> String {
    match extension {
        Some(ext) => format!("{stem} ({n}).{ext}"),
        None => format!("{stem} ({n})"),
    }
}
