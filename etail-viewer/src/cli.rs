// Shared with build.rs through `include!`, so this file only uses clap.

use clap::{Arg, ArgAction, Command, ValueHint};

/// Usage line printed when there is nothing to show
#[allow(dead_code)]
pub const USAGE: &str = "usage: etail <filename>...  (space separated)";

pub fn build_cli() -> Command {
    Command::new("etail")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Split-screen terminal viewer for delimited tabular files")
        .arg(
            Arg::new("files")
                .help("Comma or whitespace delimited files to show, one pane each")
                .num_args(0..)
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Extra TOML config file layered over the defaults")
                .value_name("FILE")
                .value_hint(ValueHint::FilePath),
        )
        .arg(
            Arg::new("names")
                .short('n')
                .long("names")
                .help("Start with the file name line shown above each pane")
                .action(ArgAction::SetTrue),
        )
}
