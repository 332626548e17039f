//! Command-line options.

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use parmlib_render::{BuildRequest, DEFAULT_DATASET};

/// Build a parmlib member from a YAML file and a template
#[derive(Debug, Parser)]
#[command(
    name = "parmlibbuild",
    version,
    after_help = "All arguments are required except --dataset"
)]
pub struct Cli {
    /// The template used to build the member
    #[arg(short = 't', long)]
    pub template: String,

    /// The YAML file containing the data
    #[arg(short = 'y', long)]
    pub yaml: PathBuf,

    /// The member being created
    #[arg(short = 'm', long)]
    pub member: PathBuf,

    /// The Parmlib dataset (currently shown but not used to place the member)
    #[arg(short = 'd', long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides this.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Templates resolve against the working directory.
    pub fn to_request(&self) -> BuildRequest {
        BuildRequest::new(&self.template, &self.yaml, &self.member)
    }

    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
