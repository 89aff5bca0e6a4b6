// Platform-specific filesystem operations

/// Characters that cannot appear in a directory name on any supported platform
pub const ILLEGAL_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

pub fn is_illegal_name_char(c: char) -> bool {
    c.is_control() || ILLEGAL_NAME_CHARS.contains(&c)
}

#[cfg(windows)]
pub fn is_hidden(entry: &std::fs::DirEntry) -> bool {
    const FILE_ATTRIBUTE_HIDDEN: u32 = 2;

    if entry.file_name().to_string_lossy().starts_with('.') {
        return true;
    }

    if let Ok(metadata) = entry.metadata() {
        use std::os::windows::fs::MetadataExt;
        let attributes = metadata.file_attributes();
        (attributes & FILE_ATTRIBUTE_HIDDEN) != 0
    } else {
        false
    }
}

#[cfg(not(windows))]
pub fn is_hidden(entry: &std::fs::DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
