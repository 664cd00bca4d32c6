use clap::Parser;
use ticklab::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
