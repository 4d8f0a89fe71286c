//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstats::ChatstatsError;
use chatstats::cli::Args;
use chatstats::core::{ChatStats, apply_filters};
use chatstats::enrich::EnrichedTable;
use chatstats::format::{OutputFormat, write_to_format};
use chatstats::normalize::StopwordSet;
use chatstats::pipeline::Pipeline;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.log_level());

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let output_path = args.output_path();
    let format: OutputFormat = args.format.into();
    let config = args.pipeline_config();
    let filter = args.filter_config()?;

    println!("📦 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", output_path.display());
    println!("📄 Format:  {}", format);
    if config.export.streaming {
        println!("🌊 Mode:    Streaming");
    }
    println!();

    let stopwords = StopwordSet::load(&config.stopwords_path)?;
    let workers = config.enrich.worker_count();

    println!("⏳ Extracting messages ({} workers)...", workers);
    let start = Instant::now();
    let output = Pipeline::new(config, &stopwords).run_path(&args.input)?;
    let stats = output.stats;
    println!(
        "   {} messages from {} lines ({:.2}s)",
        stats.messages,
        stats.lines,
        start.elapsed().as_secs_f64()
    );

    let table = if filter.is_active() {
        println!("🔍 Filtering rows...");
        let rows = apply_filters(output.table.into_rows(), &filter);
        println!("   {} rows after filtering", rows.len());
        EnrichedTable::new(rows)
    } else {
        output.table
    };

    println!("💾 Writing {}...", format);
    write_to_format(&table, &output_path, format)?;

    if let Some(ref stats_path) = args.stats {
        let aggregates = ChatStats::from_rows(table.rows());
        chatstats::core::write_stats_json(&aggregates, stats_path)?;
        println!("📈 Statistics saved to {}", stats_path.display());
    }

    println!();
    println!("✅ Done! Output saved to {}", output_path.display());

    println!();
    println!("📊 Summary:");
    println!("   Messages:     {}", stats.messages);
    println!("   Forwarded:    {}", stats.forwarded);
    println!("   Attachments:  {}", stats.attachments);
    println!("   Plain:        {}", stats.plain);
    println!("   Rows written: {}", table.len());
    println!(
        "   Cache:        {} hits / {} misses ({} distinct texts)",
        stats.cache_hits, stats.cache_misses, stats.distinct_texts
    );

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}
