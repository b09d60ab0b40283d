//! Standalone binary for the etail split-screen viewer.
//! Usage:
//!   etail [OPTIONS] <file>...

mod cli;
mod logging;
mod viewer;

use clap::ArgMatches;
use etail_config::{ConfigError, EtailConfig, Loader};
use etail_table::OpenFiles;
use std::path::PathBuf;
use tracing::info;

fn main() {
    let matches = cli::build_cli().get_matches();

    let paths = file_args(&matches);
    if paths.is_empty() {
        println!("{}", cli::USAGE);
        return;
    }

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    logging::init(&config.logging);

    // unreadable files were already logged and are skipped
    let (files, skipped) = OpenFiles::open_all(paths);
    info!(opened = files.len(), skipped = skipped.len(), "opened files");
    if files.is_empty() {
        println!("{}", cli::USAGE);
        return;
    }

    if let Err(err) = viewer::viewer::run_viewer(files, &config) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn file_args(matches: &ArgMatches) -> Vec<PathBuf> {
    matches
        .get_many::<String>("files")
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default()
}

fn load_config(matches: &ArgMatches) -> Result<EtailConfig, ConfigError> {
    layer_config(matches, etail_config::user_config_file())
}

/// Defaults, then `user_file` if present, then `--config`, then flags
fn layer_config(
    matches: &ArgMatches,
    user_file: Option<PathBuf>,
) -> Result<EtailConfig, ConfigError> {
    let mut loader = Loader::new();
    if let Some(path) = user_file {
        loader = loader.with_optional_file(path);
    }
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    if matches.get_flag("names") {
        loader = loader.set_override("layout.show_filenames", true)?;
    }
    loader.build()
}
