//! CLI entry point for gencore.

use clap::Parser;
use gencore::{Cli, Lps};

fn main() {
    let cli = Cli::parse();
    std::process::exit(gencore::run::<Lps>(cli));
}
