use std::path::Path;

use zip::ZipArchive;

use crate::error::{Error, Result};

/// Extracts every entry of the zip at `archive` into `target`, overwriting existing files.
/// Returns the number of entries extracted.
pub fn extract(archive: &Path, target: &Path) -> Result<usize> {
    let file = std::fs::File::open(archive)
        .map_err(|e| Error::ArchiveMissing(archive.to_path_buf(), e))?;
    let mut zip = ZipArchive::new(file).map_err(|source| Error::Extraction {
        archive: archive.to_path_buf(),
        source,
    })?;

    std::fs::create_dir_all(target)?;
    let mut extracted = 0;
    // Modes are applied once everything is written, a read-only directory
    // entry would otherwise block the files extracted into it.
    let mut modes = Vec::new();
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|source| Error::Extraction {
            archive: archive.to_path_buf(),
            source,
        })?;
        let relative = match entry.enclosed_name() {
            Some(path) => path,
            None => {
                log::warn!("skipping entry with unsafe path : {}", entry.name());
                continue;
            }
        };
        let outpath = target.join(relative);

        if entry.is_dir() {
            log::trace!("creating directory {:?}", outpath);
            std::fs::create_dir_all(&outpath)?;
            make_writable(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)?;
            }
            if outpath.is_file() {
                std::fs::remove_file(&outpath)?;
            }
            log::trace!("extracting {:?}", outpath);
            let mut outfile = std::fs::File::create(&outpath)?;
            std::io::copy(&mut entry, &mut outfile)?;
        }

        if let Some(mode) = entry.unix_mode() {
            modes.push((outpath, entry.is_dir(), mode));
        }
        extracted += 1;
    }

    // files first, then directories from the deepest up
    modes.sort_by_key(|(path, is_dir, _)| {
        (*is_dir, std::cmp::Reverse(path.components().count()))
    });
    for (path, _, mode) in modes {
        set_mode(&path, mode)?;
    }

    log::debug!("extracted {} entries from {}", extracted, archive.display());
    Ok(extracted)
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

/// Gives the owner write access to a directory left read-only by a previous extraction.
#[cfg(unix)]
fn make_writable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mode = std::fs::metadata(path)?.permissions().mode();
    if mode & 0o700 != 0o700 {
        set_mode(path, mode | 0o700)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn make_writable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}
