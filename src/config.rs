use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    error::{Error, Result},
    prompt::Prompter,
    utils,
};

pub const DEFAULT_INSTALL_PATH: &str = ".";
pub const DEFAULT_FILE_NAME: &str = "atom-windows.zip";
pub const DEFAULT_RELEASES_URL: &str = "https://api.github.com/repos/atom/atom/releases";
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/atom/atom/releases/download/v{version}/atom-windows.zip";
pub const DEFAULT_PAYLOAD_DIR: &str = "Atom";

#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-existing directory the application is installed to.
    pub install_path: PathBuf,
    /// Staging directory, blank to use the working directory.
    pub download_path: PathBuf,
    /// Name to save the archive as.
    pub file_name: String,
    pub releases_url: String,
    /// Archive url, `{version}` is replaced by the release name.
    pub archive_url: String,
    /// Directory the archive extracts its payload to.
    pub payload_dir: String,
    /// Copy the payload over the installation.
    pub install: bool,
    pub working_dir: PathBuf,
}

impl Config {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            install_path: PathBuf::from(DEFAULT_INSTALL_PATH),
            download_path: PathBuf::new(),
            file_name: DEFAULT_FILE_NAME.to_string(),
            releases_url: DEFAULT_RELEASES_URL.to_string(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            payload_dir: DEFAULT_PAYLOAD_DIR.to_string(),
            install: false,
            working_dir: working_dir.into(),
        }
    }

    /// The directory the archive is downloaded and extracted to.
    pub fn download_dir(&self) -> PathBuf {
        utils::resolve_download_path(&self.download_path, &self.working_dir)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.download_dir().join(&self.file_name)
    }

    pub fn payload_path(&self) -> PathBuf {
        self.download_dir().join(&self.payload_dir)
    }

    /// Checks the install path and file name, then asks before falling back to the
    /// working directory when the download path is unusable.
    pub fn validate(&self, prompter: &mut dyn Prompter, out: &mut dyn Write) -> Result<()> {
        if !utils::is_valid_path(&self.install_path) {
            return Err(Error::InvalidInstallPath(self.install_path.clone()));
        }
        if self.file_name.trim().is_empty() {
            return Err(Error::EmptyFileName);
        }
        if !utils::is_valid_path(&self.download_path) {
            log::debug!("download path {:?} is not usable", self.download_path);
            let message = fallback_message(&self.working_dir);
            if !prompter.confirm(&message, false)? {
                return Err(Error::DownloadPathRejected(self.download_path.clone()));
            }
            writeln!(
                out,
                "Using current working directory {}.",
                self.working_dir.display()
            )?;
        }
        Ok(())
    }
}

fn fallback_message(cwd: &Path) -> String {
    format!(
        "No valid download path specified. Your options are:\
         \n\tY: Use the current working directory ({})\
         \n\tN: Terminate\
         \nSelect an option [y/N]",
        cwd.display()
    )
}
