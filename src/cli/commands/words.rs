use anyhow::{Result, bail};
use clap::Args;
use serde_json::json;

use super::Context;
use crate::parallel::ForkJoinPool;
use crate::reduce::{SAMPLE_SENTENCE, count_words_sequentially, count_words_with};

#[derive(Args, Debug, Default)]
pub struct WordsArgs {
    /// Text to count; several arguments are joined with single spaces
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Smallest remainder a word sequence will split
    #[arg(long)]
    pub min_split: Option<usize>,

    /// Sequences whose size is at or below this are counted without splitting
    #[arg(short, long)]
    pub threshold: Option<usize>,
}

/// Execute the words command
pub fn execute(args: WordsArgs, ctx: &Context<'_>) -> Result<()> {
    let settings = ctx.settings(json!({
        "word_count": { "min_split": args.min_split, "threshold": args.threshold }
    }))?;
    let output = ctx.output;
    let pool = ForkJoinPool::new(&settings.pool)?;

    let text = if args.text.is_empty() {
        output.info("No text given, counting the sample sentence");
        SAMPLE_SENTENCE.to_string()
    } else {
        args.text.join(" ")
    };

    let parallel = count_words_with(&pool, &text, &settings.word_count)?;
    let sequential = count_words_sequentially(&text);
    tracing::debug!(parallel, sequential, "word counts");

    if parallel != sequential {
        bail!("parallel count {parallel} differs from sequential count {sequential}");
    }

    output.header("Word count");
    output.table_row("Characters", &text.chars().count().to_string());
    output.table_row("Min split", &settings.word_count.min_split.to_string());
    output.table_row("Threshold", &settings.word_count.threshold.to_string());
    output.table_row("Workers", &pool.parallelism().to_string());
    output.result(&format!("Found {parallel} words"));

    Ok(())
}
