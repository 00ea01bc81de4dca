//! Evaluation harness: decode a task file against a dictionary and report
//! accuracy.
//!
//! The first task line's leading field carries the keyboard layout; the
//! harness builds the dictionary clusters and the vantage-point index from
//! it, then decodes every line, printing the top prediction to stdout.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use swipe_decoder::{decode, DecoderConfig, Dictionary, KeyLayout, SwipeEvent};

/// Swipe gesture decoder - predict words from touch keyboard swipes
#[derive(Parser, Debug)]
#[command(name = "swipe-decoder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the dictionary file (one word per line)
    #[arg(long)]
    dict: PathBuf,

    /// Path to the tasks file (layout + swipe events)
    #[arg(long)]
    tasks: PathBuf,

    /// Number of clusters to quantize the dictionary into
    #[arg(long, default_value_t = 1000)]
    clusters_count: usize,

    /// Maximum number of clusters consulted per swipe
    #[arg(long, default_value_t = 20)]
    clusters_limit: usize,

    /// Number of quantization iterations
    #[arg(long, default_value_t = 5)]
    iterations: usize,

    /// Seed for quantization and index construction
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = DecoderConfig::default()
        .with_cluster_count(cli.clusters_count)
        .with_cluster_limit(cli.clusters_limit)
        .with_iterations(cli.iterations)
        .with_seed(cli.seed);
    config.validate()?;

    let words = read_lines(&cli.dict)?;
    info!(words = words.len(), "loaded dictionary");
    let mut dict = Dictionary::new(words);

    let tasks = read_lines(&cli.tasks)?;
    let Some(first_line) = tasks.first() else {
        info!("task file is empty");
        return Ok(());
    };

    // Every task line carries the layout description in its leading field;
    // only the first one is used.
    let layout = KeyLayout::parse(first_line)?;
    info!(keys = layout.len(), "parsed layout, quantizing dictionary");
    dict.quantize(&layout, &config)?;
    info!(
        clusters = dict.cluster_centers().len(),
        "building vantage-point index"
    );
    let index = dict.build_index(config.seed);

    let mut processed = 0usize;
    let mut correct = 0usize;

    for line in &tasks {
        let event = SwipeEvent::parse(line)?;
        let candidates = decode(&event, &dict, &layout, &index, &config)?;

        let prediction = candidates.first().map(|c| c.word.as_str()).unwrap_or("");
        println!("{prediction}");

        if event.target.as_deref() == Some(prediction) {
            correct += 1;
        }

        processed += 1;
        if processed % 10 == 0 {
            info!(processed, "progress");
        }
    }

    if processed > 0 {
        info!(
            processed,
            correct,
            accuracy = correct as f64 / processed as f64,
            "done"
        );
    }

    Ok(())
}

fn read_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let file = File::open(path)?;
    BufReader::new(file).lines().collect()
}
