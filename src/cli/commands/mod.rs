use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use serde_json::Value;

use crate::cli::Output;
use crate::config::{ForkJoinConfig, Settings};

pub mod bench;
pub mod config;
pub mod sum;
pub mod words;

#[derive(Parser)]
#[command(
    name = "forkjoin",
    version = env!("CARGO_PKG_VERSION"),
    about = "Fork/join divide-and-conquer reductions on a work-stealing pool",
    long_about = "forkjoin sums numeric ranges with a recursive fork/join task and counts words \
                  by splitting text only at whitespace, combining partial results in order."
)]
pub struct Cli {
    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output except the result
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Number of worker threads (0 = one per CPU core)
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sum the natural numbers 1..=N with a fork/join task
    Sum(sum::SumArgs),
    /// Count words in parallel, splitting text only at whitespace
    Words(words::WordsArgs),
    /// Compare summation strategies and report the fastest run of each
    Bench(bench::BenchArgs),
    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

/// Shared inputs every command needs
pub struct Context<'a> {
    pub config_path: Option<&'a str>,
    pub threads: Option<usize>,
    pub output: &'a Output,
}

impl Context<'_> {
    /// Load settings with the command's overrides on top, plus the global thread override
    pub fn settings(&self, mut overrides: Value) -> Result<Settings> {
        if let Some(threads) = self.threads {
            overrides["pool"]["threads"] = Value::from(threads);
        }
        ForkJoinConfig::load(self.config_path, Some(overrides))?.settings()
    }
}

impl Cli {
    pub fn run(self) -> Result<()> {
        setup_logging(self.verbose, self.quiet);

        let output = Output::new(self.verbose > 0, self.quiet);
        let ctx = Context {
            config_path: self.config.as_deref(),
            threads: self.threads,
            output: &output,
        };

        let result = match self.command {
            Some(Commands::Sum(args)) => sum::execute(args, &ctx),
            Some(Commands::Words(args)) => words::execute(args, &ctx),
            Some(Commands::Bench(args)) => bench::execute(args, &ctx),
            Some(Commands::Config(cmd)) => config::execute(cmd, &ctx),
            None => {
                // Show help when no command is provided
                let mut cmd = Cli::command();
                cmd.print_help()?;
                Ok(())
            }
        };

        if let Err(err) = &result {
            output.error(&format!("{err:#}"));
        }
        result
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
