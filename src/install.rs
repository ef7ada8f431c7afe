use std::path::Path;

use crate::{error::Result, utils};

/// Copies every top-level item of `payload` into `install_path`.
/// Existing directories and files at the destination are removed before being replaced.
pub fn install_payload(payload: &Path, install_path: &Path) -> Result<()> {
    for source in utils::collect_paths_in_dir(payload)? {
        let name = match source.file_name() {
            Some(name) => name,
            None => continue,
        };
        let destination = install_path.join(name);
        if source.is_dir() {
            if destination.exists() {
                log::debug!("removing directory {:?}", destination);
                std::fs::remove_dir_all(&destination)?;
            }
            log::info!("Installing directory {:?} -> {:?}", source, destination);
            utils::copy_dir_recursive(&source, &destination)?;
        } else {
            if destination.exists() {
                log::debug!("removing file {:?}", destination);
                std::fs::remove_file(&destination)?;
            }
            log::info!("Installing file {:?} -> {:?}", source, destination);
            std::fs::copy(&source, &destination)?;
        }
    }
    Ok(())
}
