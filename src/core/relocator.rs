//! Moves downloaded audio files from the working directory into a
//! library folder without overwriting anything already there.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BvdlError, Result};

/// Extensions treated as audio output of the downloader
pub const AUDIO_EXTENSIONS: [&str; 6] = ["mp3", "m4a", "aac", "wav", "ogg", "flac"];

/// Highest numeric suffix tried before giving up on a name
pub const MAX_COLLISION_SUFFIX: u32 = 9999;

/// A completed move, for reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    pub original: String,
    pub final_name: String,
}

impl MovedFile {
    pub fn renamed(&self) -> bool {
        self.original != self.final_name
    }
}

pub fn is_audio_file(name: &str) -> bool {
    let lower = name.to_lowercase();
    AUDIO_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(&format!(".{}", ext)))
}

/// Split `name` into stem and extension (with its dot).
///
/// A leading dot does not start an extension.
fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    }
}

/// Pick a free path for `file_name` inside `dir`.
///
/// Tries `dir/file_name`, then `dir/<stem>_1<ext>`, `dir/<stem>_2<ext>`, ...
/// up to [`MAX_COLLISION_SUFFIX`]. Returns `None` when every candidate is taken.
pub fn resolve_collision<F>(dir: &Path, file_name: &str, exists: F) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let candidate = dir.join(file_name);
    if !exists(candidate.as_path()) {
        return Some(candidate);
    }

    let (stem, ext) = split_name(file_name);
    (1..=MAX_COLLISION_SUFFIX)
        .map(|n| dir.join(format!("{}_{}{}", stem, n, ext)))
        .find(|candidate| !exists(candidate.as_path()))
}

/// Audio files directly inside `dir`, sorted by name
pub fn scan_audio_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if is_audio_file(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }

    files.sort_by_key(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    });
    Ok(files)
}

/// Move every audio file in `work_dir` into `dest_dir`.
///
/// `on_move` is called after each successful rename. The first failure stops
/// the run; files already moved stay where they are.
pub fn relocate<F>(work_dir: &Path, dest_dir: &Path, mut on_move: F) -> Result<Vec<MovedFile>>
where
    F: FnMut(&MovedFile),
{
    fs::create_dir_all(dest_dir)?;

    let files = scan_audio_files(work_dir)?;
    let mut moved = Vec::with_capacity(files.len());

    for source in files {
        let original = source
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let target = resolve_collision(dest_dir, &original, |p| p.exists()).ok_or_else(|| {
            BvdlError::NameExhausted {
                name: original.clone(),
                attempts: MAX_COLLISION_SUFFIX,
            }
        })?;

        log::debug!("Moving {:?} -> {:?}", source, target);
        fs::rename(&source, &target).map_err(|e| BvdlError::Relocation {
            file: original.clone(),
            moved: moved.len(),
            source: e,
        })?;

        let record = MovedFile {
            final_name: target
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| original.clone()),
            original,
        };
        on_move(&record);
        moved.push(record);
    }

    Ok(moved)
}
