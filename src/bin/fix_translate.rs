use std::fs;
use std::io::Write;
use std::path::PathBuf;
use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, LevelFilter};
use sijill::{
    table::ColumnTable,
    translate::{ChainTranslator, DictionaryTranslator},
    ArabicFixer, BatchOptions, BatchProcessor, BatchReport, Result, SijillConfig,
};

/// Configuration for a batch fix-and-translate run
struct JobConfig {
    /// Input CSV (overrides the configured input_file)
    input: Option<PathBuf>,
    /// Output CSV path (defaults into the configured output_dir)
    output: Option<PathBuf>,
    /// Extra dictionary terms file
    terms_file: Option<PathBuf>,
    /// Extra segmentation patterns file
    patterns_file: Option<PathBuf>,
    /// Path to configuration file
    config_file: Option<String>,
    /// Whether to print help and exit
    show_help: bool,
}

impl JobConfig {
    /// Parse command line arguments into configuration
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();

        let mut config = JobConfig {
            input: None,
            output: None,
            terms_file: None,
            patterns_file: None,
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
                "--output" => {
                    if i + 1 < args.len() {
                        config.output = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--terms" => {
                    if i + 1 < args.len() {
                        config.terms_file = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
                },
                "--patterns" => {
                    if i + 1 < args.len() {
                        config.patterns_file = Some(PathBuf::from(&args[i + 1]));
                        i += 1;
                    }
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
        println!("Sijill Fix & Translate - Command Line Options:");
        println!("  <file.csv>               Input table (same as --input)");
        println!("  <config.ini>             Use a specific configuration file");
        println!("  --input <path>           Input CSV table");
        println!("  --output <path>          Output CSV path");
        println!("  --terms <path>           Extra arabic=english dictionary terms");
        println!("  --patterns <path>        Extra glued=spaced segmentation patterns");
        println!("  --help, -h               Show this help");
    }
}

fn print_report(report: &BatchReport) {
    println!("\nBatch summary");
    println!("  rows processed:     {}", report.total_processed);
    println!("  translated:         {}", report.translated);
    println!("  avg confidence:     {}%", report.average_confidence);
    println!("  services used:      {}", if report.services_used.is_empty() {
        "none".to_string()
    } else {
        report.services_used.join(", ")
    });
    println!("  elapsed:            {:.1?}", report.elapsed);

    if !report.samples.is_empty() {
        println!("\nSample results:");
        for sample in &report.samples {
            println!("  row {:>4} ({}%)", sample.row, sample.confidence);
            println!("    original:    {}", sample.original);
            println!("    fixed:       {}", sample.fixed);
            println!("    translation: {}", sample.translation);
        }
    }
}

fn main() -> Result<()> {
    let job = JobConfig::from_args();
    if job.show_help {
        JobConfig::print_help();
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
        .open(config.files.logs_dir.join(format!("fix_translate_{}.log", timestamp)))?;

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

    info!("Text fixing: {}", config.fixer.describe());
    info!("Translation: {}", config.translator.describe());

    // Assemble the collaborators the batch flow will use
    let mut fixer = ArabicFixer::new(config.fixer.clone());
    fixer.load_patterns_from_config(&config.fixer)?;
    if let Some(path) = &job.patterns_file {
        fixer.load_patterns(path)?;
    }

    let mut dictionary = DictionaryTranslator::new();
    if let Some(path) = &config.translator.terms_file {
        dictionary.load_terms(path)?;
    }
    if let Some(path) = &job.terms_file {
        dictionary.load_terms(path)?;
    }
    let translator = ChainTranslator::new().push(Box::new(dictionary));

    let input = job.input.clone().unwrap_or_else(|| config.files.input_file.clone());
    info!("Reading table from {:?}", input);
    let mut table = ColumnTable::from_path(&input)?;

    let options = BatchOptions::from_config(&config)?;
    let range = options.rows.clamp_to(table.row_count());

    let progress = ProgressBar::new(range.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress.set_message("Processing rows");

    let processor = BatchProcessor::new(&fixer, &translator);
    let report = processor.process(&mut table, &options, Some(&progress))?;
    progress.finish_and_clear();

    // Write the augmented table
    let output = job.output.clone().unwrap_or_else(|| {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "table".to_string());
        config.files.output_dir.join(format!("{}_translated.csv", stem))
    });
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    table.write_to_path(&output)?;
    println!("Updated table: {}", output.display());

    print_report(&report);

    if config.processor.write_report {
        fs::create_dir_all(&config.files.report_dir)?;
        let report_path = config
            .files
            .report_dir
            .join(format!("fix_translate_{}.json", timestamp));
        let file = fs::File::create(&report_path)?;
        serde_json::to_writer_pretty(file, &report)?;
        info!("Wrote batch report to {:?}", report_path);
        println!("Batch report: {}", report_path.display());
    }

    Ok(())
}
