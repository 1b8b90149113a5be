use clap::Parser;
use edgemap::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
