use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Inventory Management System")]
pub struct Cli {
    /// Start with the demonstration catalog
    #[clap(long)]
    pub sample: bool,

    /// Path to the settings file (defaults to INVENTORY_SETTINGS or the user config dir)
    #[clap(long)]
    pub settings: Option<PathBuf>,

    /// Increase log output (-v for info, -vv for debug)
    #[clap(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the interactive inventory shell (the default)
    Shell,

    /// Print the starting catalog and exit
    Dump {
        /// Output format
        #[clap(long, short = 'f', value_enum, default_value_t = DumpFormat::Table)]
        format: DumpFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Table,
    Json,
    Yaml,
}
