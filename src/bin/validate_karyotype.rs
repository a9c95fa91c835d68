use clap::Parser;

use iscn::cli::{run, Cli};

fn main() {
    let cli = Cli::parse();
    std::process::exit(run(&cli));
}
