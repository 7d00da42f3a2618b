//! docxforge CLI - WordprocessingML fixture builder
//!
//! A command-line tool for writing the built-in fixture documents, previewing
//! their resolved list labels, and inspecting the parts of a .docx package.

use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use docxforge::package::{Compression, PackageReader, WriteOptions};
use docxforge::render::{JsonFormat, OutlineOptions, TableLayout};
use docxforge::{fixtures, DocxWriter};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build WordprocessingML fixture documents
#[derive(Parser)]
#[command(
    name = "docxforge",
    author = "iyulab",
    version,
    about = "Build and inspect WordprocessingML fixture documents",
    long_about = "docxforge - Deterministic .docx builder with list numbering resolution.\n\n\
                  Writes fixture documents, previews their list labels, and inspects packages."
)]
struct Cli {
    /// Log library activity (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a fixture document
    Fixture {
        /// Fixture name (see `fixtures`)
        name: String,

        /// Output file path (default: <name>.docx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Store entries without compression
        #[arg(long)]
        stored: bool,
    },

    /// List the built-in fixtures
    Fixtures,

    /// Print a fixture's outline with resolved list labels
    Outline {
        /// Fixture name
        name: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutlineFormat,

        /// Table layout for text output
        #[arg(long, default_value = "tabs")]
        tables: TableMode,
    },

    /// List the parts, content types, and relationships of a package
    Inspect {
        /// Input .docx file
        input: PathBuf,
    },

    /// Show version information
    Version,
}

/// Outline output format
#[derive(Clone, ValueEnum)]
enum OutlineFormat {
    /// Plain text outline
    Text,
    /// Pretty-printed JSON model
    Json,
    /// Compact JSON model
    CompactJson,
}

/// Table rendering mode
#[derive(Clone, ValueEnum)]
enum TableMode {
    /// Tab-separated cells
    Tabs,
    /// ASCII grid
    Grid,
}

impl From<TableMode> for TableLayout {
    fn from(mode: TableMode) -> Self {
        match mode {
            TableMode::Tabs => TableLayout::Tabs,
            TableMode::Grid => TableLayout::Grid,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "docxforge=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn find_fixture(name: &str) -> Result<&'static fixtures::Fixture, Box<dyn std::error::Error>> {
    fixtures::find(name).ok_or_else(|| {
        format!(
            "unknown fixture {:?} (run `docxforge fixtures` for the list)",
            name
        )
        .into()
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Fixture {
            name,
            output,
            stored,
        } => {
            let fixture = find_fixture(&name)?;
            let pb = create_spinner("Building document...");

            let doc = fixture.build()?;
            pb.set_message("Assembling package...");

            let options = if stored {
                WriteOptions::new().with_compression(Compression::Stored)
            } else {
                WriteOptions::new()
            };
            let bytes = DocxWriter::new(&doc).to_bytes(&options)?;
            let path = output.unwrap_or_else(|| PathBuf::from(format!("{}.docx", fixture.name)));
            fs::write(&path, &bytes)?;
            tracing::debug!(fixture = fixture.name, path = %path.display(), "fixture written");

            pb.finish_and_clear();
            println!(
                "{} Wrote {} ({} bytes)",
                "✓".green().bold(),
                path.display(),
                bytes.len()
            );
        }

        Commands::Fixtures => {
            println!("{}", "Fixtures".cyan().bold());
            println!("{}", "─".repeat(40));
            for fixture in fixtures::catalog() {
                println!("{:<16} {}", fixture.name.bold(), fixture.description);
            }
        }

        Commands::Outline {
            name,
            output,
            format,
            tables,
        } => {
            let doc = find_fixture(&name)?.build()?;
            let rendered = match format {
                OutlineFormat::Text => {
                    let options = OutlineOptions::new().with_table_layout(tables.into());
                    docxforge::render::to_outline(&doc, &options)
                }
                OutlineFormat::Json => docxforge::render::to_json(&doc, JsonFormat::Pretty)?,
                OutlineFormat::CompactJson => {
                    docxforge::render::to_json(&doc, JsonFormat::Compact)?
                }
            };
            write_output(output.as_ref(), &rendered)?;

            if let Some(path) = output {
                println!("{} Outline written: {}", "✓".green().bold(), path.display());
            }
        }

        Commands::Inspect { input } => {
            let pb = create_spinner("Opening package...");
            let reader = PackageReader::open(&input)?;
            let content_types = reader.content_types()?;
            let entries = reader.list_files();
            pb.finish_and_clear();

            println!("{}", "Package".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Entries".bold(), entries.len());

            println!("\n{}", "Parts".cyan().bold());
            println!("{}", "─".repeat(40));
            for entry in &entries {
                let content_type = content_types.content_type_for(entry).unwrap_or("?");
                println!("{:<32} {}", entry, content_type.dimmed());
            }

            println!("\n{}", "Relationships".cyan().bold());
            println!("{}", "─".repeat(40));
            let mut sources = vec![String::new()];
            sources.extend(
                entries
                    .iter()
                    .filter(|e| !e.ends_with(".rels") && e.as_str() != "[Content_Types].xml")
                    .cloned(),
            );
            for source in sources {
                let rels = if source.is_empty() {
                    reader.read_package_relationships()?
                } else {
                    reader.read_relationships(&source)?
                };
                if rels.is_empty() {
                    continue;
                }
                let label = if source.is_empty() { "(package)" } else { source.as_str() };
                println!("{}", label.bold());
                for rel in rels.iter() {
                    let kind = rel.rel_type.rsplit('/').next().unwrap_or(&rel.rel_type);
                    let mode = if rel.is_external() { " (external)" } else { "" };
                    println!("  {:<6} {:<14} {}{}", rel.id, kind, rel.target, mode.yellow());
                }
            }

            let main = reader.main_document_path()?;
            if let Some(xml) =
                reader.read_related(&main, docxforge::package::part::rel_type::NUMBERING)?
            {
                let model = docxforge::docx::parse_numbering(&xml)?;
                println!("\n{}", "Numbering".cyan().bold());
                println!("{}", "─".repeat(40));
                println!("{}: {}", "Definitions".bold(), model.abstracts.len());
                println!("{}: {}", "Instances".bold(), model.instances.len());
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "docxforge".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Deterministic WordprocessingML builder with list numbering resolution");
    println!();
    println!("Parts: document, styles, numbering, footnotes");
    println!("Repository: https://github.com/iyulab/docxforge");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fixture_args() {
        let cli = Cli::try_parse_from(["docxforge", "fixture", "tables", "-o", "t.docx"]).unwrap();
        match cli.command {
            Commands::Fixture { name, output, stored } => {
                assert_eq!(name, "tables");
                assert_eq!(output, Some(PathBuf::from("t.docx")));
                assert!(!stored);
            }
            _ => panic!("expected fixture command"),
        }
    }

    #[test]
    fn test_unknown_fixture_message() {
        let err = find_fixture("nope").unwrap_err();
        assert!(err.to_string().contains("nope"));
    }
}
