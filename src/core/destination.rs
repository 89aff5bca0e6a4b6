//! Destination menu for downloaded audio
//!
//! The menu is rebuilt on every run from the library directory:
//!
//! - `1`: current directory (files stay where the downloader put them)
//! - `2..=N+1`: existing library subdirectories
//! - `N+2`: create a new subdirectory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::error::Result;
use crate::platform::{is_hidden, is_illegal_name_char};

/// One row of the destination menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    CurrentDirectory,
    Existing { name: String, path: PathBuf },
    CreateNew,
}

impl MenuEntry {
    pub fn label(&self) -> String {
        match self {
            MenuEntry::CurrentDirectory => "Current directory (do not move files)".to_string(),
            MenuEntry::Existing { name, .. } => name.clone(),
            MenuEntry::CreateNew => "Create a new folder".to_string(),
        }
    }
}

/// Where the downloaded files end up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    CurrentDirectory,
    Directory(PathBuf),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("{value} is out of range (1-{max})")]
    OutOfRange { value: usize, max: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Folder name cannot be empty")]
    Empty,

    #[error("'{0}' is not a valid folder name")]
    Reserved(String),

    #[error("A folder named '{0}' already exists")]
    AlreadyExists(String),
}

/// A directory name after illegal characters have been replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedName {
    pub name: String,
    pub replaced: bool,
}

/// Replace characters that are not allowed in file names with `placeholder`
pub fn sanitize_dir_name(raw: &str, placeholder: char) -> SanitizedName {
    let trimmed = raw.trim();
    let mut replaced = false;

    let name = trimmed
        .chars()
        .map(|c| {
            if is_illegal_name_char(c) {
                replaced = true;
                placeholder
            } else {
                c
            }
        })
        .collect();

    SanitizedName { name, replaced }
}

/// List the visible subdirectories of `library_dir`, sorted case-insensitively.
///
/// A missing library directory is an empty library.
pub fn list_library(library_dir: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(library_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::debug!("Library directory {:?} does not exist", library_dir);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() || is_hidden(&entry) {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().to_string());
    }

    names.sort_by_key(|name| name.to_lowercase());
    Ok(names)
}

/// Numbered destination menu
#[derive(Debug, Clone)]
pub struct DestinationMenu {
    library_dir: PathBuf,
    entries: Vec<MenuEntry>,
}

impl DestinationMenu {
    pub fn load(library_dir: &Path) -> Result<Self> {
        let names = list_library(library_dir)?;
        log::debug!("Library {:?} has {} folder(s)", library_dir, names.len());
        Ok(Self::from_names(library_dir, names))
    }

    pub fn from_names(library_dir: &Path, names: Vec<String>) -> Self {
        let mut entries = Vec::with_capacity(names.len() + 2);
        entries.push(MenuEntry::CurrentDirectory);
        entries.extend(names.into_iter().map(|name| MenuEntry::Existing {
            path: library_dir.join(&name),
            name,
        }));
        entries.push(MenuEntry::CreateNew);

        Self {
            library_dir: library_dir.to_path_buf(),
            entries,
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Names of the existing library folders, in menu order
    pub fn existing_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            MenuEntry::Existing { name, .. } => Some(name.as_str()),
            _ => None,
        })
    }

    /// Parse a 1-based menu choice
    pub fn parse_selection(&self, input: &str) -> std::result::Result<&MenuEntry, SelectionError> {
        let trimmed = input.trim();
        let value: usize = trimmed
            .parse()
            .map_err(|_| SelectionError::NotANumber(trimmed.to_string()))?;

        let max = self.entries.len();
        if value == 0 || value > max {
            return Err(SelectionError::OutOfRange { value, max });
        }

        Ok(&self.entries[value - 1])
    }

    /// Sanitize a proposed folder name and check it against the library
    pub fn validate_new_name(
        &self,
        raw: &str,
        placeholder: char,
    ) -> std::result::Result<SanitizedName, NameError> {
        let sanitized = sanitize_dir_name(raw, placeholder);

        if sanitized.name.is_empty() {
            return Err(NameError::Empty);
        }
        if sanitized.name == "." || sanitized.name == ".." {
            return Err(NameError::Reserved(sanitized.name));
        }
        if self.existing_names().any(|name| name == sanitized.name)
            || fs::symlink_metadata(self.library_dir.join(&sanitized.name)).is_ok()
        {
            return Err(NameError::AlreadyExists(sanitized.name));
        }

        Ok(sanitized)
    }

    /// Create `name` inside the library directory.
    ///
    /// Fails with `io::ErrorKind::AlreadyExists` if anything already has that name.
    pub fn create(&self, name: &str) -> Result<PathBuf> {
        let path = self.library_dir.join(name);
        fs::create_dir_all(&self.library_dir)?;
        fs::create_dir(&path)?;
        log::debug!("Created destination {:?}", path);
        Ok(path)
    }
}
