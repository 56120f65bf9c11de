use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File containing the grammar snapshot
    pub file: PathBuf,

    /// Sentence to recognize with the predictive table
    #[arg(short, long, value_name = "SENTENCE")]
    pub sentence: Option<String>,

    /// Print the FIRST and FOLLOW sets
    #[arg(long)]
    pub sets: bool,

    /// Print the predictive table
    #[arg(long)]
    pub table: bool,
}
