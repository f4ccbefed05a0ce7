use std::fs;
use std::io::Write;
use std::path::PathBuf;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};
use sijill::{
    aggregate, classify,
    table::{ColumnSelector, ColumnTable},
    LineCategory, LineRecord, Result, SijillConfig,
};

/// Configuration for a line-analysis run
struct AnalyzeConfig {
    /// Input file (text lines, or CSV when a column is given)
    input: Option<PathBuf>,
    /// CSV column to analyze instead of raw text lines
    column: Option<String>,
    /// Whether to write the per-line JSON report
    json_report: Option<bool>,
    /// Path to configuration file
    config_file: Option<String>,
    /// Whether to print help and exit
    show_help: bool,
}

impl AnalyzeConfig {
    /// Parse command line arguments into configuration
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();

        let mut config = AnalyzeConfig {
            input: None,
            column: None,
            json_report: None,
            config_file: None,
            show_help: false,
        };

        let mut i = 1; // Skip program name
        while i < args.len() {
            match args[i].as_str() {
                "--input" => {
                    if i + 1 < args.len() {
                        config.input = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--column" => {
                    if i + 1 < args.len() {
                        config.column = Some(args[i + 1].clone());
                        i += 1;
                    }
                },
                "--json-report" => {
                    config.json_report = Some(true);
                },
                "--no-json-report" => {
                    config.json_report = Some(false);
                },
                "--help" | "-h" => {
                    config.show_help = true;
                },
                arg if arg.ends_with(".ini") => {
                    config.config_file = Some(arg.to_string());
                },
                arg if !arg.starts_with("--") && config.input.is_none() => {
                    config.input = Some(PathBuf::from(arg));
                },
                _ => {
                    // Unrecognized argument, just ignore
                }
            }
            i += 1;
        }

        config
    }

    /// Print help information about command line options
    fn print_help() {
        println!("Sijill Line Analyzer - Command Line Options:");
        println!("  <file>                   Input file (text lines, or CSV with --column)");
        println!("  <config.ini>             Use a specific configuration file");
        println!("  --input <path>           Input file (same as the positional form)");
        println!("  --column <sel>           Treat input as CSV and analyze this column");
        println!("                           (0-based index or header name)");
        println!("  --json-report            Write the per-line JSON report");
        println!("  --no-json-report         Skip the JSON report");
        println!("  --help, -h               Show this help");
    }
}

fn load_lines(path: &PathBuf, column: Option<&str>, config: &SijillConfig) -> Result<Vec<String>> {
    match column {
        Some(selector) => {
            let table = ColumnTable::from_path(path)?;
            let selector = match selector.parse::<usize>() {
                Ok(index) => ColumnSelector::Index(index),
                Err(_) => ColumnSelector::Name(selector.to_string()),
            };
            let column_index = selector.resolve(&table)?;
            let range = config.processor.row_range()?.clamp_to(table.row_count());
            Ok(range
                .map(|row| table.cell(row, column_index).unwrap_or("").to_string())
                .collect())
        },
        None => {
            let content = fs::read_to_string(path)?;
            Ok(content.lines().map(str::to_string).collect())
        },
    }
}

fn print_summary(records: &[LineRecord]) {
    let report = aggregate(records);

    println!("\nLine analysis summary");
    println!("  total lines:         {}", report.total_lines);
    println!("  timestamped entries: {}", report.timestamp_lines);
    println!("  header lines:        {}", report.header_lines);
    println!("  empty lines:         {}", report.empty_lines);
    println!("  mixed content:       {}", report.mixed_lines);

    // A few entry rows as a sanity check on the extraction
    let mut shown = 0;
    for record in records {
        if record.category != LineCategory::TimestampedEntry {
            continue;
        }
        if shown == 0 {
            println!("\nSample entries:");
        }
        println!(
            "  line {:>4} [{}] {} arabic run(s), {} separator(s), {} bank code(s)",
            record.index,
            record.timestamp.as_deref().unwrap_or("??:??"),
            record.arabic_runs.len(),
            record.separator_count,
            record.bank_codes.len()
        );
        shown += 1;
        if shown == 5 {
            break;
        }
    }
}

fn main() -> Result<()> {
    let job = AnalyzeConfig::from_args();
    if job.show_help {
        AnalyzeConfig::print_help();
        return Ok(());
    }

    // Load configuration first
    let config = match &job.config_file {
        Some(path) => SijillConfig::from_ini(path)?,
        None => SijillConfig::default(),
    };

    // Set up logging infrastructure
    fs::create_dir_all(&config.files.logs_dir)?;
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let log_file = fs::OpenOptions::new()
        .create(true)
        .write(true)
        .append(true)
        .open(config.files.logs_dir.join(format!("line_analysis_{}.log", timestamp)))?;

    env_logger::Builder::new()
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    let input = job.input.clone().unwrap_or_else(|| config.files.input_file.clone());
    info!("Starting line analysis of {:?}", input);

    let lines = load_lines(&input, job.column.as_deref(), &config)?;
    info!("Loaded {} lines", lines.len());

    let progress = ProgressBar::new(lines.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_message("Classifying lines");

    let records: Vec<LineRecord> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            progress.inc(1);
            classify(line, i + 1)
        })
        .collect();
    progress.finish_and_clear();

    print_summary(&records);

    let write_report = job.json_report.unwrap_or(config.processor.write_report);
    if write_report {
        fs::create_dir_all(&config.files.report_dir)?;
        let report_path = config
            .files
            .report_dir
            .join(format!("line_analysis_{}.json", timestamp));
        let file = fs::File::create(&report_path)?;
        serde_json::to_writer_pretty(file, &records)?;
        info!("Wrote per-line report to {:?}", report_path);
        println!("\nPer-line report: {}", report_path.display());
    }

    Ok(())
}
