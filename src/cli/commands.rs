use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::family::FamilyKey;

#[derive(Parser)]
#[command(name = "tasksel", about = concat!("tasksel v", env!("CARGO_PKG_VERSION"), " - family selection and bulk-edit checks for task tables"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file (default: ./tasksel.toml when present)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Refuse rows without a kind tag (overrides classify.legacy)
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log classification and selection details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the family key of every row
    Family(FamilyArgs),
    /// Replay clicks on rows and report the selection and edit eligibility
    Select(SelectArgs),
    /// Report rows that need kind inference or cannot be classified
    Check(CheckArgs),
}

#[derive(Args)]
pub struct FamilyArgs {
    /// JSON file with an array of rows
    pub items: PathBuf,
    /// Only show rows in this family (e.g. task:100)
    #[arg(long, value_name = "FAMILY")]
    pub key: Option<FamilyKey>,
}

#[derive(Args)]
pub struct SelectArgs {
    /// JSON file with an array of rows
    pub items: PathBuf,
    /// Rows to toggle, in click order, as <kind>/<id> (e.g. task/2)
    #[arg(value_name = "REF")]
    pub toggles: Vec<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// JSON file with an array of rows
    pub items: PathBuf,
}
