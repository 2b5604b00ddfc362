//! CLI tool for extracting slide decks from Moodle lecture pages.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use deck_core::{Deck, GroupingOptions, PageDescriptor};
use deck_html::{is_lecture_page, DeckBuilder, Document};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

/// Output representation of the page sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON array of pages
    Json,
    /// One line per page with its position, kind and title
    Summary,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Summary => "txt",
        }
    }
}

/// Split Moodle lecture pages into presentation slides.
#[derive(Parser, Debug)]
#[command(name = "deck-extract")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input HTML file(s) saved from a lecture page
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Minimum estimated lines per text slide
    #[arg(long, default_value = "7")]
    min_lines: usize,

    /// Maximum estimated lines per text slide
    #[arg(long, default_value = "15")]
    max_lines: usize,

    /// Characters that fit on one slide line
    #[arg(long, default_value = "80")]
    chars_per_line: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let options = GroupingOptions::new()
        .with_chars_per_line(args.chars_per_line)
        .with_min_lines(args.min_lines)
        .with_max_lines(args.max_lines);
    let builder = DeckBuilder::with_options(options).context("Invalid slide budget")?;

    for input_path in &args.input {
        if args.verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_file(input_path, &args, &builder) {
            Ok(output) => {
                if args.print {
                    print!("{}", output);
                } else {
                    let output_path =
                        get_output_path(input_path, args.output.as_ref(), args.format)?;
                    write_output(&output_path, &output)?;
                    if args.verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    Ok(())
}

/// Process a single HTML file.
fn process_file(input_path: &Path, args: &Args, builder: &DeckBuilder) -> Result<String> {
    let file = File::open(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;
    let document = Document::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read {}", input_path.display()))?;

    if !is_lecture_page(&document) {
        log::warn!(
            "{} does not look like a Moodle lesson page",
            input_path.display()
        );
    }

    let pages = builder.build_pages(&document);

    if args.verbose {
        let units = pages.iter().filter(|p| p.is_title()).count();
        eprintln!("  Found {} lectures, {} slides", units, pages.len());
    }

    let output = match args.format {
        OutputFormat::Json => {
            let mut json =
                serde_json::to_string_pretty(&pages).context("Failed to serialize pages")?;
            json.push('\n');
            json
        }
        OutputFormat::Summary => format_summary(pages),
    };

    Ok(output)
}

/// Render one line per page, e.g. `3/12 [image] Lecture 1 (fig.png)`.
fn format_summary(pages: Vec<PageDescriptor>) -> String {
    let mut deck = Deck::new(pages);
    if deck.is_empty() {
        return "No slides to display\n".to_string();
    }

    let mut out = String::new();
    for idx in 0..deck.len() {
        deck.go_to(idx);
        let (Some(position), Some(page)) = (deck.indicator(), deck.current()) else {
            continue;
        };
        let detail = match page {
            PageDescriptor::Image { src, .. } => format!(" ({})", src),
            _ => String::new(),
        };
        out.push_str(&format!(
            "{} [{}] {}{}\n",
            position,
            page.kind(),
            page.title(),
            detail
        ));
    }
    out
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => {
            if let Some(parent) = input_path.parent() {
                parent.join(output_filename)
            } else {
                PathBuf::from(output_filename)
            }
        }
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
