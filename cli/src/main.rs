//! unscan CLI - layout reconstruction for scanned images

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use unscan::render::{self, ExtractionStats};
use unscan::{
    Extraction, JsonFormat, LayoutOptions, OcrEngine, PaddleJsonEngine, Pipeline,
    PipelineOptions, RenderOptions, TableVocabulary, TesseractEngine,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "unscan")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild tables and paragraphs from scanned images", long_about = None)]
struct Cli {
    /// Input image file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print region labels without icons
    #[arg(long)]
    plain: bool,

    #[command(flatten)]
    engine: EngineArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the layout report (default)
    Report {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Print region labels without icons
        #[arg(long)]
        plain: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Convert an image to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Convert an image to plain text
    Text {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Convert an image to JSON
    Json {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show image and layout information
    Info {
        /// Input image file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Process many images into an output directory
    Batch {
        /// Input image files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "unscan_output")]
        output: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "report")]
        format: BatchFormat,

        /// Process files one at a time
        #[arg(long)]
        sequential: bool,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct EngineArgs {
    /// OCR engine
    #[arg(long, value_enum, default_value = "tesseract")]
    engine: EngineKind,

    /// PaddleOCR result file to use for every image (implies --engine paddle-json)
    #[arg(long, value_name = "FILE")]
    ocr_json: Option<PathBuf>,

    /// Directory holding PaddleOCR `<stem>_res.json` files
    #[arg(long, value_name = "DIR")]
    ocr_dir: Option<PathBuf>,

    /// Path to the tesseract binary
    #[arg(long, value_name = "PATH", default_value = "tesseract")]
    tesseract: PathBuf,

    /// Tesseract recognition language
    #[arg(long, default_value = "eng")]
    lang: String,

    /// Tesseract page segmentation mode
    #[arg(long, default_value_t = 3)]
    psm: u8,

    /// Drop tokens at or below this confidence (0.0-1.0)
    #[arg(long, env = "UNSCAN_CONFIDENCE", default_value_t = 0.6)]
    confidence: f64,

    /// Maximum vertical distance from a row's mean center
    #[arg(long, env = "UNSCAN_ROW_THRESHOLD", default_value_t = 25.0)]
    row_threshold: f64,

    /// JSON file with `cell_terms` and `continuation_terms`
    #[arg(long, value_name = "FILE")]
    vocabulary: Option<PathBuf>,

    /// Apply Unicode NFC normalization to recognized text
    #[arg(long)]
    nfc: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum EngineKind {
    /// Run the tesseract command-line tool
    Tesseract,
    /// Read PaddleOCR JSON result files
    PaddleJson,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum BatchFormat {
    /// Layout report
    Report,
    /// Markdown
    Markdown,
    /// Plain text
    Text,
    /// JSON
    Json,
}

impl BatchFormat {
    fn extension(self) -> &'static str {
        match self {
            BatchFormat::Report => "report.txt",
            BatchFormat::Markdown => "md",
            BatchFormat::Text => "txt",
            BatchFormat::Json => "json",
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Report {
            input,
            output,
            plain,
            engine,
        }) => cmd_report(&input, output.as_deref(), plain, &engine),
        Some(Commands::Markdown {
            input,
            output,
            engine,
        }) => cmd_markdown(&input, output.as_deref(), &engine),
        Some(Commands::Text {
            input,
            output,
            engine,
        }) => cmd_text(&input, output.as_deref(), &engine),
        Some(Commands::Json {
            input,
            output,
            compact,
            engine,
        }) => cmd_json(&input, output.as_deref(), compact, &engine),
        Some(Commands::Info { input, engine }) => cmd_info(&input, &engine),
        Some(Commands::Batch {
            inputs,
            output,
            format,
            sequential,
            engine,
        }) => cmd_batch(&inputs, &output, format, sequential, &engine),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            if let Some(input) = cli.input {
                cmd_report(&input, None, cli.plain, &cli.engine)
            } else {
                println!("{}", "Usage: unscan <FILE>".yellow());
                println!("       unscan --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_engine(args: &EngineArgs) -> Box<dyn OcrEngine> {
    if let Some(ref file) = args.ocr_json {
        return Box::new(PaddleJsonEngine::from_file(file));
    }
    match args.engine {
        EngineKind::PaddleJson => match args.ocr_dir {
            Some(ref dir) => Box::new(PaddleJsonEngine::with_result_dir(dir)),
            None => Box::new(PaddleJsonEngine::new()),
        },
        EngineKind::Tesseract => Box::new(
            TesseractEngine::new()
                .with_binary(&args.tesseract)
                .with_language(&args.lang)
                .with_psm(args.psm),
        ),
    }
}

fn build_pipeline(args: &EngineArgs, parallel: bool) -> CliResult<Pipeline<Box<dyn OcrEngine>>> {
    let mut layout = LayoutOptions::new()
        .with_confidence_threshold(args.confidence)
        .with_row_threshold(args.row_threshold)
        .with_unicode_normalization(args.nfc);

    if let Some(ref path) = args.vocabulary {
        layout = layout.with_vocabulary(TableVocabulary::from_file(path)?);
    }

    let options = PipelineOptions::new()
        .with_layout(layout)
        .with_parallel(parallel);
    Ok(Pipeline::new(build_engine(args), options)?)
}

fn extract(input: &Path, args: &EngineArgs) -> CliResult<Extraction> {
    let pipeline = build_pipeline(args, false)?;
    Ok(pipeline.process_path(input)?)
}

fn write_output(content: &str, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn render_format(extraction: &Extraction, format: BatchFormat, icons: bool) -> CliResult<String> {
    let options = RenderOptions::new().with_icons(icons);
    let content = match (format, extraction.document()) {
        (BatchFormat::Report, _) => render::to_report(extraction, &options)?,
        (BatchFormat::Json, _) => render::extraction_to_json(extraction, JsonFormat::Pretty)?,
        (BatchFormat::Markdown, Some(doc)) => render::to_markdown(doc, &options)?,
        (BatchFormat::Text, Some(doc)) => render::to_text(doc)?,
        (_, None) => render::NO_TEXT_DETECTED.to_string(),
    };
    Ok(content)
}

fn cmd_report(
    input: &Path,
    output: Option<&Path>,
    plain: bool,
    args: &EngineArgs,
) -> CliResult<()> {
    let extraction = extract(input, args)?;
    let report = render_format(&extraction, BatchFormat::Report, !plain)?;
    write_output(&report, output)
}

fn cmd_markdown(input: &Path, output: Option<&Path>, args: &EngineArgs) -> CliResult<()> {
    let extraction = extract(input, args)?;
    let markdown = render_format(&extraction, BatchFormat::Markdown, true)?;
    write_output(&markdown, output)
}

fn cmd_text(input: &Path, output: Option<&Path>, args: &EngineArgs) -> CliResult<()> {
    let extraction = extract(input, args)?;
    let text = render_format(&extraction, BatchFormat::Text, true)?;
    write_output(&text, output)
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    args: &EngineArgs,
) -> CliResult<()> {
    let extraction = extract(input, args)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::extraction_to_json(&extraction, format)?;
    write_output(&json, output)
}

fn cmd_info(input: &Path, args: &EngineArgs) -> CliResult<()> {
    let extraction = extract(input, args)?;

    println!("{}", "Image Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());

    let doc = match extraction {
        Extraction::Document(doc) => doc,
        Extraction::NoText(reason) => {
            println!("{}: {}", "Result".bold(), render::NO_TEXT_DETECTED.yellow());
            println!("{}: {}", "Reason".bold(), reason);
            return Ok(());
        }
    };

    let meta = &doc.metadata;
    if let Some(format) = meta.format {
        println!("{}: {}", "Format".bold(), format);
    }
    if let (Some(w), Some(h)) = (meta.width, meta.height) {
        println!("{}: {}x{}", "Size".bold(), w, h);
    }
    if let Some(ref engine) = meta.engine {
        println!("{}: {}", "Engine".bold(), engine);
    }
    println!(
        "{}: {} seen, {} kept, {} low confidence, {} empty",
        "Tokens".bold(),
        meta.tokens.seen,
        meta.tokens.kept,
        meta.tokens.low_confidence,
        meta.tokens.empty_text
    );

    println!();
    println!("{}", "Layout Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = ExtractionStats::from_document(&doc);
    println!("{}: {}", "Rows".bold(), stats.row_count);
    println!("{}: {}", "Regions".bold(), doc.regions.len());
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Table cells".bold(), stats.cell_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    format: BatchFormat,
    sequential: bool,
    args: &EngineArgs,
) -> CliResult<()> {
    fs::create_dir_all(output_dir)?;
    let pipeline = build_pipeline(args, !sequential)?;
    log::debug!(
        "batch: {} files with {} into {}",
        inputs.len(),
        pipeline.engine().name(),
        output_dir.display()
    );

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Processing images...");

    let outcomes = pipeline.process_batch_with(inputs, |_| pb.inc(1));
    pb.finish_with_message("Done!");

    let mut totals = ExtractionStats::new();
    let (mut empty, mut failed) = (0usize, 0usize);

    println!("\n{}", "Results:".green().bold());
    for outcome in &outcomes {
        let name = outcome.path.display();
        match &outcome.result {
            Ok(extraction) => {
                let stem = outcome
                    .path
                    .file_stem()
                    .unwrap_or_default()
                    .to_string_lossy();
                let target = output_dir.join(format!("{}.{}", stem, format.extension()));
                fs::write(&target, render_format(extraction, format, true)?)?;

                match extraction.document() {
                    Some(doc) => {
                        totals.merge(&ExtractionStats::from_document(doc));
                        println!("  {} {} -> {}", "✓".green(), name, target.display());
                    }
                    None => {
                        empty += 1;
                        println!("  {} {} ({})", "·".yellow(), name, render::NO_TEXT_DETECTED);
                    }
                }
            }
            Err(e) => {
                failed += 1;
                println!("  {} {}: {}", "✗".red(), name, e);
            }
        }
    }

    println!(
        "\n{} {} files, {} without text, {} failed; {} tables, {} paragraphs",
        "Summary:".bold(),
        outcomes.len(),
        empty,
        failed,
        totals.table_count,
        totals.paragraph_count
    );

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, outcomes.len()).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "unscan".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout reconstruction for scanned images");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/unscan".dimmed());
    println!("License: MIT");
}
