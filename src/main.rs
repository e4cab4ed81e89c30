//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::process;
use std::time::{Duration, Instant};

use clap::Parser as ClapParser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use chatstats::cli::{AnalyzeArgs, Args, Command, InputKind, ParseArgs, ReportFormat};
use chatstats::config::AnalysisConfig;
use chatstats::output::{OutputConfig, read_records_csv, write_json, write_records_csv, write_tables};
use chatstats::parser::{ParseSummary, TranscriptParser};
use chatstats::stats::StatsAggregator;
use chatstats::{ChatstatsError, Record};

const REPORT_FILE: &str = "report.json";

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatsError> {
    println!("📊 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    match &args.command {
        Command::Parse(parse_args) => run_parse(parse_args),
        Command::Analyze(analyze_args) => run_analyze(analyze_args),
    }
}

fn run_parse(args: &ParseArgs) -> Result<(), ChatstatsError> {
    println!("📂 Input:   {}", args.input.display());
    println!("💾 Output:  {}", args.output.display());
    println!();

    let config = AnalysisConfig::from_files(args.aliases.as_deref(), None)?;
    let (records, summary, parse_time) = parse_transcript(&args.input, &config)?;
    print_parse_summary(&records, &summary, parse_time);

    println!("💾 Writing records...");
    write_records_csv(&records, &args.output)?;

    println!();
    println!("✅ Done! Records saved to {}", args.output.display());
    Ok(())
}

fn run_analyze(args: &AnalyzeArgs) -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let kind = InputKind::from_path(&args.input);

    println!("📂 Input:   {} ({})", args.input.display(), kind);
    println!("📁 Out dir: {}", args.out_dir.display());
    println!("📄 Format:  {}", args.format);
    println!();

    let mut config = AnalysisConfig::from_files(args.aliases.as_deref(), args.stopwords.as_deref())?;
    if let Some(k) = args.top_k {
        config = config.with_top_words(k);
    }

    let records = match kind {
        InputKind::Transcript => {
            let (records, summary, parse_time) = parse_transcript(&args.input, &config)?;
            print_parse_summary(&records, &summary, parse_time);
            records
        }
        InputKind::Records => {
            println!("⏳ Loading records...");
            let records = read_records_csv(&args.input)?;
            println!("   Loaded {} records", records.len());
            records
        }
    };

    println!("🧮 Aggregating...");
    let aggregate_start = Instant::now();
    let report = StatsAggregator::new(&config).analyze(&records);
    println!(
        "   {} participants ({:.2}s)",
        report.participants.len(),
        aggregate_start.elapsed().as_secs_f64()
    );

    println!("💾 Writing {}...", args.format);
    match args.format {
        ReportFormat::Csv => {
            let written = write_tables(&report, &args.out_dir, &OutputConfig::new())?;
            for path in &written {
                println!("   {}", path.display());
            }
        }
        ReportFormat::Json => {
            std::fs::create_dir_all(&args.out_dir)?;
            let path = args.out_dir.join(REPORT_FILE);
            write_json(&report, &path)?;
            println!("   {}", path.display());
        }
    }

    println!();
    println!("✅ Done! Report saved to {}", args.out_dir.display());

    println!();
    println!("📊 Summary:");
    println!("   Messages:      {}", report.total_messages());
    println!("   Participants:  {}", report.participants.len());
    if let Some(top) = &report.mentions.most_mentioned {
        println!("   Most mentioned: {}", top);
    }
    println!("   Total time:    {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn parse_transcript(
    path: &Path,
    config: &AnalysisConfig,
) -> Result<(Vec<Record>, ParseSummary, Duration), ChatstatsError> {
    println!("⏳ Parsing transcript...");
    let parse_start = Instant::now();

    let file = File::open(path)?;
    let mut iter = TranscriptParser::new(config).records(BufReader::new(file));
    let records = iter
        .by_ref()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| match e {
            ChatstatsError::Utf8 { path: None, source } => ChatstatsError::utf8(path, source),
            other => other,
        })?;

    Ok((records, iter.summary(), parse_start.elapsed()))
}

fn print_parse_summary(records: &[Record], summary: &ParseSummary, parse_time: Duration) {
    println!(
        "   Found {} messages in {} lines ({:.2}s)",
        records.len(),
        summary.lines,
        parse_time.as_secs_f64()
    );
    if summary.rejected() > 0 {
        println!(
            "   Dropped: {} unregistered, {} assistant, {} system, {} bad timestamps",
            summary.unregistered_contacts,
            summary.assistant_messages,
            summary.system_events,
            summary.bad_timestamps
        );
    }
}
