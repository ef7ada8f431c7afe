use std::path::{Path, PathBuf};

/// Returns the paths of the entries directly under `dir`.
pub fn collect_paths_in_dir(dir: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
    std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect()
}

/// Recursively copies the directory `source` to `destination`.
/// `destination` is created if it doesnt exist, existing files under it are overwritten.
pub fn copy_dir_recursive(source: &Path, destination: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(destination)?;
    for entry in std::fs::read_dir(source)? {
        let entry = entry?;
        let target = destination.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            log::trace!("copying {:?} -> {:?}", entry.path(), target);
            std::fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// A path is blank if it is empty or only contains whitespace.
pub fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// A configured path is usable if it is not blank and exists.
pub fn is_valid_path(path: &Path) -> bool {
    !is_blank(path) && path.exists()
}

/// Returns `configured` if it is a usable path, otherwise `cwd`.
pub fn resolve_download_path(configured: &Path, cwd: &Path) -> PathBuf {
    if is_valid_path(configured) {
        configured.to_path_buf()
    } else {
        cwd.to_path_buf()
    }
}

pub fn current_working_directory() -> std::io::Result<PathBuf> {
    std::env::current_dir()
}
