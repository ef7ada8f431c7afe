use std::io::Write;

use colored::Colorize;

use crate::{
    archive,
    config::Config,
    error::Result,
    install,
    prompt::Prompter,
    release::ReleaseSource,
};

pub const APP_NAME: &str = "Atom";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user answered no at one of the confirmation prompts.
    Declined,
    Updated { version: String, installed: bool },
}

pub struct Updater<'a> {
    config: &'a Config,
    source: &'a dyn ReleaseSource,
    prompter: &'a mut dyn Prompter,
    out: &'a mut dyn Write,
}

impl<'a> Updater<'a> {
    pub fn new(
        config: &'a Config,
        source: &'a dyn ReleaseSource,
        prompter: &'a mut dyn Prompter,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            config,
            source,
            prompter,
            out,
        }
    }

    /// Runs the whole update.
    /// A failing step aborts the run without cleaning up what was already written.
    pub fn run(&mut self) -> Result<Outcome> {
        writeln!(
            self.out,
            "{}\nEnsure that your configuration is valid and correct before proceeding.\
             \nBy proceeding, you agree to the terms of the license.",
            format!("Your installation of {} will now be updated.", APP_NAME).bold()
        )?;
        if !self.prompter.confirm("Proceed? [Y/n]", true)? {
            return Ok(Outcome::Declined);
        }

        let version = self.source.latest_version()?;
        log::info!("latest version is {}", version);
        let question = format!(
            "Do you want to download and install version {} of {}? [Y/n]",
            version, APP_NAME
        );
        if !self.prompter.confirm(&question, true)? {
            return Ok(Outcome::Declined);
        }

        self.config.validate(self.prompter, self.out)?;
        self.download(&version)?;
        self.extract()?;
        if self.config.install {
            self.install()?;
        } else {
            log::info!("installation disabled, leaving {:?} untouched", self.config.install_path);
        }
        self.clean();

        writeln!(self.out, "{}", "Done.".green())?;
        self.prompter.pause("Press ENTER to terminate.")?;
        Ok(Outcome::Updated {
            version,
            installed: self.config.install,
        })
    }

    pub fn download(&mut self, version: &str) -> Result<()> {
        writeln!(
            self.out,
            "Downloading {} to {}...",
            self.config.file_name,
            self.config.download_dir().display()
        )?;
        self.source.download(version, &self.config.archive_path())
    }

    pub fn extract(&mut self) -> Result<()> {
        writeln!(self.out, "Extracting {} archive...", APP_NAME)?;
        archive::extract(&self.config.archive_path(), &self.config.download_dir())?;
        Ok(())
    }

    pub fn install(&mut self) -> Result<()> {
        writeln!(self.out, "Installing {} to specified path...", APP_NAME)?;
        install::install_payload(&self.config.payload_path(), &self.config.install_path)
    }

    /// Removes the archive and the extracted payload. Failures are ignored.
    pub fn clean(&mut self) {
        let _ = writeln!(self.out, "Cleaning up files...");
        let archive = self.config.archive_path();
        if let Err(e) = std::fs::remove_file(&archive) {
            log::debug!("failed to remove {:?} : {}", archive, e);
        }
        let payload = self.config.payload_path();
        if let Err(e) = std::fs::remove_dir_all(&payload) {
            log::debug!("failed to remove {:?} : {}", payload, e);
        }
    }
}
