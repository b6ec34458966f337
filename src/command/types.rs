use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dv_enabler")]
#[command(
    about = "Lists the column (doc values) setup of a store and writes copies with adjusted columns",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Lists the fields of a store with their column kind
    List {
        /// Folder holding the store
        #[arg(short, long)]
        index: PathBuf,

        /// Include the first stored value of every field
        #[arg(short, long)]
        verbose: bool,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },
    /// Writes a copy of a store where the given fields carry native columns
    Convert {
        /// Folder holding the source store
        #[arg(short, long)]
        index: PathBuf,

        /// Folder for the new store; must be absent or empty
        #[arg(short, long)]
        output: PathBuf,

        /// Field specs such as `title(SORTED)` or `year(NUMERIC(INT))`,
        /// space or comma separated. A single `.` copies without adjustments
        #[arg(short, long, num_args = 1.., required = true)]
        fields: Vec<String>,

        /// Encode FLOAT columns from the value itself instead of its integer part
        #[arg(long)]
        exact_float32: bool,
    },
}
