// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for building a playlist from a folder.
//!
//! Only regular files with a supported media extension are kept. The result
//! is sorted lexicographically by path so that the folder plays in a
//! predictable order.

use crate::error::Result;
use crate::media::{is_supported_media, PlaylistEntry};
use std::path::{Path, PathBuf};

/// Scans `directory` (non-recursively) for supported media files.
///
/// An empty result is not an error; callers report it as "no media found".
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn scan_directory(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut media_files = Vec::new();

    for entry in std::fs::read_dir(directory)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_file() && is_supported_media(&path) {
            media_files.push(path);
        }
    }

    media_files.sort();
    Ok(media_files)
}

/// Keeps the supported entries of an explicit file list, preserving order.
pub fn filter_supported<I>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths.into_iter().filter(|p| is_supported_media(p)).collect()
}

/// Converts scanned paths into playlist entries.
pub fn to_entries(paths: &[PathBuf]) -> Vec<PlaylistEntry> {
    paths.iter().map(|p| PlaylistEntry::from_path(p)).collect()
}
