//! Trial table discovery.
//!
//! Lists the files of a directory that match a glob pattern such as
//! `*.csv`, and resolves a chosen name into a `(directory, file)` pair. The
//! directory is always an argument; nothing here changes the working
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;

use crate::error::{GrowthError, Result};

/// Outcome of picking a table from a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableSelection {
    Selected { dir: PathBuf, file_name: String },
    NoSelection,
}

impl TableSelection {
    /// Full path of the selected file.
    pub fn path(&self) -> Option<PathBuf> {
        match self {
            TableSelection::Selected { dir, file_name } => Some(dir.join(file_name)),
            TableSelection::NoSelection => None,
        }
    }
}

/// Sorted names of the regular files in `dir` matching `pattern`.
///
/// The pattern is matched against the file name only, with `glob` syntax:
/// `*`, `?` and `[...]` character classes.
pub fn find_tables(dir: &Path, pattern: &str) -> Result<Vec<String>> {
    let pattern = Pattern::new(pattern).map_err(|e| {
        GrowthError::InvalidParameter(format!("bad table pattern '{}': {}", pattern, e))
    })?;
    let mut names = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if pattern.matches(name) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

/// Select `name` among the files of `dir` matching `pattern`.
///
/// `None`, or a name that is not among the matches, is an explicit
/// [`TableSelection::NoSelection`].
pub fn select_table(dir: &Path, pattern: &str, name: Option<&str>) -> Result<TableSelection> {
    let Some(name) = name else {
        return Ok(TableSelection::NoSelection);
    };

    let found = find_tables(dir, pattern)?;
    Ok(if found.iter().any(|candidate| candidate == name) {
        TableSelection::Selected {
            dir: dir.to_path_buf(),
            file_name: name.to_string(),
        }
    } else {
        TableSelection::NoSelection
    })
}
