use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
const VERSION_PLACEHOLDER: &str = "{version}";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub name: String,
}

/// Where releases are listed and downloaded from.
pub trait ReleaseSource {
    /// Name of the most recent release.
    fn latest_version(&self) -> Result<String>;

    /// Downloads the archive of `version` to `destination`, replacing any existing file.
    fn download(&self, version: &str, destination: &Path) -> Result<()>;
}

/// Returns the name of the first release in a JSON release listing.
pub fn parse_latest_version(body: &str) -> Result<String> {
    let releases: Vec<Release> =
        serde_json::from_str(body).map_err(|e| Error::ReleaseListing(e.to_string()))?;
    releases
        .into_iter()
        .next()
        .map(|release| release.name)
        .ok_or_else(|| Error::ReleaseListing("no releases found".to_string()))
}

pub fn archive_url(template: &str, version: &str) -> String {
    template.replace(VERSION_PLACEHOLDER, version)
}

#[derive(Debug)]
pub struct GithubReleases {
    client: reqwest::blocking::Client,
    releases_url: String,
    archive_url: String,
}

impl GithubReleases {
    pub fn new(releases_url: impl Into<String>, archive_url: impl Into<String>) -> Result<Self> {
        let releases_url = releases_url.into();
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| Error::Network {
                url: releases_url.clone(),
                source,
            })?;
        Ok(Self {
            client,
            releases_url,
            archive_url: archive_url.into(),
        })
    }

    fn get(&self, url: &str) -> Result<reqwest::blocking::Response> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send().map_err(|source| Error::Network {
            url: url.to_string(),
            source,
        })?;
        let status = response.status();
        log::trace!("{} responded with {}", url, status);
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

impl ReleaseSource for GithubReleases {
    fn latest_version(&self) -> Result<String> {
        let body = self
            .get(&self.releases_url)?
            .text()
            .map_err(|source| Error::Network {
                url: self.releases_url.clone(),
                source,
            })?;
        parse_latest_version(&body)
    }

    fn download(&self, version: &str, destination: &Path) -> Result<()> {
        let url = archive_url(&self.archive_url, version);
        let mut response = self.get(&url)?;
        let mut file = std::fs::File::create(destination)?;
        let written = response
            .copy_to(&mut file)
            .map_err(|source| Error::Network { url, source })?;
        log::info!("Downloaded {} bytes to {}", written, destination.display());
        Ok(())
    }
}
