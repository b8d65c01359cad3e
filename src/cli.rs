use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use log::LevelFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(
        short,
        long,
        default_value = "data/processed.cleveland.data",
        help = "Raw headerless Cleveland data"
    )]
    pub input: PathBuf,
    #[arg(
        short,
        long,
        default_value = "data/cleveland.csv",
        help = "Cleaned output path"
    )]
    pub output: PathBuf,
    #[arg(short, long, value_enum, default_value_t = WriteFormat::Csv, help = "Output format")]
    pub format: WriteFormat,
    #[arg(short, long, default_value = "?", help = "Token marking a missing value")]
    pub sentinel: String,
    #[arg(long, help = "Read the CSV output back and check it")]
    pub verify: bool,
    #[arg(short, long, action = ArgAction::Count, help = "Verbose level")]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WriteFormat {
    Csv,
    Parquet,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
