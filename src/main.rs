mod archive;
mod config;
mod error;
mod install;
mod prompt;
mod release;
mod updater;
mod utils;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use config::Config;
use prompt::{AssumeYes, ConsolePrompter, Prompter};
use updater::{Outcome, Updater};

#[derive(Parser, Debug)]
pub struct Flags {
    /// Pre-existing directory the application is installed to.
    #[clap(long, default_value = config::DEFAULT_INSTALL_PATH)]
    install_path: PathBuf,

    /// Directory to download and extract the archive in.
    /// Defaults to the current working directory.
    #[clap(long)]
    download_path: Option<PathBuf>,

    /// Name to save the archive as.
    #[clap(long, default_value = config::DEFAULT_FILE_NAME)]
    file_name: String,

    /// Release listing endpoint, newest release first.
    #[clap(long, default_value = config::DEFAULT_RELEASES_URL)]
    releases_url: String,

    /// Archive download url, `{version}` is replaced by the release name.
    #[clap(long, default_value = config::DEFAULT_ARCHIVE_URL)]
    archive_url: String,

    /// Directory the archive extracts its payload to.
    #[clap(long, default_value = config::DEFAULT_PAYLOAD_DIR)]
    payload_dir: String,

    /// Copy the extracted files over the installation.
    #[clap(long)]
    install: bool,
}

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    flags: Flags,

    /// Answer yes to every question and dont wait before exiting.
    #[clap(short, long)]
    yes: bool,

    /// Disable logging.
    #[clap(short, long)]
    quiet: bool,

    /// A level of verbosity, and can be used multiple times
    ///
    /// Level 0 - Warnings (Default)
    ///
    /// Level 1 - Info
    ///
    /// Level 2 - Debug
    ///
    /// Level 3 - Trace
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Flags {
    fn into_config(self, working_dir: PathBuf) -> Config {
        Config {
            install_path: self.install_path,
            download_path: self.download_path.unwrap_or_default(),
            file_name: self.file_name,
            releases_url: self.releases_url,
            archive_url: self.archive_url,
            payload_dir: self.payload_dir,
            install: self.install,
            ..Config::new(working_dir)
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !args.quiet {
        let log_level = match args.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .init();
    }

    let working_dir = utils::current_working_directory()
        .context("Failed to obtain current working directory")?;
    let config = args.flags.into_config(working_dir);
    log::debug!("{:#?}", config);

    let result = if args.yes {
        update(&config, &mut AssumeYes)
    } else {
        update(&config, &mut ConsolePrompter)
    };

    match result {
        Ok(Outcome::Declined) => {
            log::info!("update declined");
            Ok(())
        }
        Ok(Outcome::Updated { version, installed }) => {
            log::info!("updated to {} (installed : {})", version, installed);
            Ok(())
        }
        Err(e) if e.is_configuration() => {
            eprintln!("{}", format!("\n{}. Terminating!", e).red());
            std::process::exit(1);
        }
        Err(e) => Err(e).context("Update failed"),
    }
}

fn update(config: &Config, prompter: &mut dyn Prompter) -> error::Result<Outcome> {
    let source = release::GithubReleases::new(&config.releases_url, &config.archive_url)?;
    let mut stdout = std::io::stdout();
    Updater::new(config, &source, prompter, &mut stdout).run()
}
