//! officemark CLI - markup to office document models

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use officemark::parser::{DEFAULT_FONT_NAME, DEFAULT_FONT_SIZE};
use officemark::render::{to_json, to_markup, to_text};
use officemark::{generate_filename, DatedStore, DocumentStats, JsonFormat, Officemark, OutputKind};

#[derive(Parser)]
#[command(name = "officemark")]
#[command(version)]
#[command(about = "Turn lightweight markup into office document models", long_about = None)]
struct Cli {
    /// Default font family
    #[arg(long, global = true, env = "DEFAULT_FONT_NAME", default_value = DEFAULT_FONT_NAME)]
    font: String,

    /// Default font size in points
    #[arg(long, global = true, env = "DEFAULT_FONT_SIZE", default_value_t = DEFAULT_FONT_SIZE)]
    size: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse word-processing markup
    #[command(alias = "doc")]
    Document {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Parse spreadsheet markup
    #[command(alias = "xls")]
    Workbook {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Map HTML slide markup
    #[command(alias = "ppt")]
    Slides {
        /// Input HTML file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// CSS class marking one slide
        #[arg(long, default_value = "slide")]
        marker: String,

        /// Do not download remote images
        #[arg(long)]
        offline: bool,
    },

    /// Show content statistics
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Markup kind (guessed from the extension if not specified)
        #[arg(long, value_enum)]
        kind: Option<Kind>,
    },

    /// Convert many files at once
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Markup kind of every input
        #[arg(long, value_enum)]
        kind: Kind,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Save into the dated store instead of the output directory
        #[arg(long)]
        store: bool,

        /// Dated store root
        #[arg(long, env = "DOCUMENT_LOCATION", default_value = "generated_documents")]
        store_dir: PathBuf,

        /// Convert one file at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON model
    Json,
    /// Markup dialect (documents only)
    Markup,
    /// Plain text
    Text,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Kind {
    /// Word-processing markup
    Document,
    /// Spreadsheet markup
    Workbook,
    /// HTML slides
    Slides,
}

impl From<Kind> for OutputKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Document => OutputKind::Document,
            Kind::Workbook => OutputKind::Workbook,
            Kind::Slides => OutputKind::Presentation,
        }
    }
}

impl Kind {
    fn guess(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("html") | Some("htm") => Kind::Slides,
            Some("xmd") | Some("sheet") => Kind::Workbook,
            _ => Kind::Document,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let builder = Officemark::new().with_font(cli.font).with_size(cli.size);

    let result = match cli.command {
        Commands::Document {
            input,
            output,
            format,
            compact,
        } => cmd_document(&builder, &input, output.as_deref(), format, compact),
        Commands::Workbook {
            input,
            output,
            format,
            compact,
        } => cmd_workbook(&builder, &input, output.as_deref(), format, compact),
        Commands::Slides {
            input,
            output,
            format,
            compact,
            marker,
            offline,
        } => {
            let mut builder = builder.with_slide_marker(marker);
            if offline {
                builder = builder.offline();
            }
            cmd_slides(&builder, &input, output.as_deref(), format, compact)
        }
        Commands::Info { input, kind } => {
            let kind = kind.unwrap_or_else(|| Kind::guess(&input));
            cmd_info(&builder, &input, kind)
        }
        Commands::Batch {
            inputs,
            kind,
            output,
            store,
            store_dir,
            sequential,
        } => {
            let builder = if sequential { builder.sequential() } else { builder };
            let target = if store {
                Target::Store(DatedStore::new(store_dir))
            } else {
                Target::Dir(output.unwrap_or_else(|| PathBuf::from(".")))
            };
            cmd_batch(&builder, &inputs, kind, &target)
        }
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn emit(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_document(
    builder: &Officemark,
    input: &Path,
    output: Option<&Path>,
    format: Format,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let doc = builder.document(&content);

    let rendered = match format {
        Format::Json => to_json(&doc, json_format(compact))?,
        Format::Markup => to_markup(&doc, &builder.options().style()),
        Format::Text => to_text(&doc),
    };
    emit(output, &rendered)
}

fn cmd_workbook(
    builder: &Officemark,
    input: &Path,
    output: Option<&Path>,
    format: Format,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let workbook = builder.workbook(&content);

    let rendered = match format {
        Format::Json => to_json(&workbook, json_format(compact))?,
        Format::Text => to_text(&workbook),
        Format::Markup => return Err("markup output is only available for documents".into()),
    };
    emit(output, &rendered)
}

fn cmd_slides(
    builder: &Officemark,
    input: &Path,
    output: Option<&Path>,
    format: Format,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = fs::read_to_string(input)?;
    let deck = builder.presentation(&html);

    let rendered = match format {
        Format::Json => to_json(&deck, json_format(compact))?,
        Format::Text => to_text(&deck),
        Format::Markup => return Err("markup output is only available for documents".into()),
    };
    emit(output, &rendered)
}

fn cmd_info(
    builder: &Officemark,
    input: &Path,
    kind: Kind,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = fs::read_to_string(input)?;
    let generated = builder.convert(kind.into(), &content)?;
    let stats = generated.stats();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Kind".bold(), generated.kind());
    println!(
        "{}: {}",
        "Target".bold(),
        generate_filename(generated.kind(), input.file_stem().and_then(|s| s.to_str()), now())
    );

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    print_stats(&stats);

    Ok(())
}

fn print_stats(stats: &DocumentStats) {
    let rows = [
        ("Headings", stats.heading_count),
        ("Paragraphs", stats.paragraph_count),
        ("List items", stats.list_item_count),
        ("Tables", stats.table_count),
        ("Table rows", stats.table_row_count),
        ("Sheets", stats.sheet_count),
        ("Cells", stats.cell_count),
        ("Slides", stats.slide_count),
        ("Shapes", stats.shape_count),
        ("Images", stats.image_count),
    ];
    for (label, count) in rows.iter().filter(|(_, count)| *count > 0) {
        println!("{}: {}", label.bold(), count);
    }
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
}

enum Target {
    Dir(PathBuf),
    Store(DatedStore),
}

fn cmd_batch(
    builder: &Officemark,
    inputs: &[PathBuf],
    kind: Kind,
    target: &Target,
) -> Result<(), Box<dyn std::error::Error>> {
    let kind = OutputKind::from(kind);

    let pb = ProgressBar::new(inputs.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Converting...");
    let contents = inputs
        .iter()
        .map(|path| Ok((kind, fs::read_to_string(path)?)))
        .collect::<Result<Vec<_>, std::io::Error>>()?;
    let results = builder.convert_batch(&contents);
    pb.inc(1);

    if let Target::Dir(dir) = target {
        fs::create_dir_all(dir)?;
    }

    let mut written = Vec::new();
    let mut failures = 0;
    for (path, result) in inputs.iter().zip(results) {
        pb.set_message(path.display().to_string());
        let stem = path.file_stem().and_then(|s| s.to_str());
        match result.and_then(|generated| generated.to_json(JsonFormat::Pretty)) {
            Ok(json) => {
                let filename = format!("{}.json", generate_filename(kind, stem, now()));
                let location = match target {
                    Target::Dir(dir) => {
                        let file = dir.join(&filename);
                        fs::write(&file, &json)?;
                        file.display().to_string()
                    }
                    Target::Store(store) => store.put(&filename, json.as_bytes(), now().date())?,
                };
                written.push(location);
            }
            Err(e) => {
                failures += 1;
                log::warn!("{}: {}", path.display(), e);
                pb.println(format!("{} {}: {}", "Failed".red(), path.display(), e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, location) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), location);
    }
    if failures > 0 {
        return Err(format!("{} of {} conversions failed", failures, inputs.len()).into());
    }
    Ok(())
}

fn now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn cmd_version() {
    println!("{} {}", "officemark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markup to office document models");
    println!();
    println!("License: MIT");
}
