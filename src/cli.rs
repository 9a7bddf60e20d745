//! Command-line interface implementation for appforge.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::TEMPLATES_DIR;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for appforge.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "appforge: starter template generator for web and mobile projects",
    long_about = None
)]
pub struct Args {
    /// Template id or short alias (api, saas, mobile, about)
    #[arg(short, long, value_name = "TEMPLATE")]
    pub template: Option<String>,

    /// Name of the generated project
    #[arg(short, long, value_name = "NAME")]
    pub name: Option<String>,

    /// Directory where the generated project will be created
    #[arg(short, long, value_name = "OUTPUT_DIR")]
    pub output: Option<PathBuf>,

    /// Accept catalog defaults for every prompt (fully non-interactive)
    #[arg(short, long)]
    pub defaults: bool,

    /// Override a customization, e.g. --set includeStripe=false.
    /// May be given multiple times; unknown keys are ignored with a warning.
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set: Vec<String>,

    /// List available templates and exit
    #[arg(short, long)]
    pub list: bool,

    /// Overwrite an existing output directory without asking
    #[arg(short, long)]
    pub force: bool,

    /// Root directory containing the template catalog and template trees
    #[arg(long, value_name = "DIR", default_value = TEMPLATES_DIR)]
    pub templates_dir: PathBuf,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
pub fn get_args() -> Args {
    Args::parse()
}
