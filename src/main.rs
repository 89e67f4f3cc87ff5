use clap::Parser;

use forkjoin::Cli;

fn main() {
    let cli = Cli::parse();
    // Errors were already reported by the command's output handler
    if cli.run().is_err() {
        std::process::exit(1);
    }
}
