use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No valid installation path specified : {}", .0.display())]
    InvalidInstallPath(PathBuf),
    #[error("No valid file name specified for downloading the zip")]
    EmptyFileName,
    #[error("No valid download path specified : {}", .0.display())]
    DownloadPathRejected(PathBuf),
    #[error("Request to {url} failed : {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("Invalid release listing : {0}")]
    ReleaseListing(String),
    #[error("The archive path did not exist : {}\n{}", .0.display(), .1)]
    ArchiveMissing(PathBuf, std::io::Error),
    #[error("Failed to extract archive {} : {source}", .archive.display())]
    Extraction {
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("Prompt error : {0}")]
    Prompt(#[from] inquire::InquireError),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

impl Error {
    /// Errors caused by the configuration rather than by the environment.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::InvalidInstallPath(_) | Error::EmptyFileName | Error::DownloadPathRejected(_)
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
