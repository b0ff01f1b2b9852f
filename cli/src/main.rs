//! cvmark CLI - CV document flattening and profile extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cvmark::{extract, flatten, EngineRegistry};

#[derive(Parser)]
#[command(name = "cvmark")]
#[command(version)]
#[command(about = "Flatten CV documents to Markdown and extract consultant profiles", long_about = None)]
struct Cli {
    /// Input document file
    #[arg(short, long, value_name = "FILE", global = true)]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Markup engine to use
    #[arg(long, value_name = "NAME", global = true)]
    engine: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a document to line-oriented Markdown (default)
    #[command(alias = "md")]
    Flatten,

    /// Extract a structured consultant profile as JSON
    Profile {
        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Extract the consultant portrait image
    Image {
        /// Output directory
        #[arg(short = 'd', long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// List available markup engines
    Engines,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Flatten) | None => {
            cmd_flatten(cli.input.as_deref(), cli.output.as_deref(), cli.engine.as_deref())
        }
        Some(Commands::Profile { compact }) => cmd_profile(
            cli.input.as_deref(),
            cli.output.as_deref(),
            cli.engine.as_deref(),
            compact,
        ),
        Some(Commands::Image { dir }) => cmd_image(cli.input.as_deref(), dir.as_deref()),
        Some(Commands::Engines) => {
            cmd_engines();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn require_input(input: Option<&Path>) -> Result<&Path, Box<dyn std::error::Error>> {
    input.ok_or_else(|| "no input file; pass -i <FILE>".into())
}

fn convert(input: &Path, engine: Option<&str>) -> Result<cvmark::DocTree, Box<dyn std::error::Error>> {
    let registry = EngineRegistry::with_defaults();
    log::debug!(
        "converting {} with engine {}",
        input.display(),
        engine.unwrap_or("(default)")
    );

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Converting {}...", input.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let tree = match engine {
        Some(name) => registry.convert_with(name, input),
        None => registry.convert(input),
    };

    pb.finish_and_clear();
    let tree = tree?;
    log::debug!("engine produced {} blocks", tree.blocks.len());
    Ok(tree)
}

fn cmd_flatten(
    input: Option<&Path>,
    output: Option<&Path>,
    engine: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = require_input(input)?;
    let tree = convert(input, engine)?;
    let markdown = flatten::to_markdown(&flatten::flatten(&tree));

    write_or_print(output, &markdown)
}

fn cmd_profile(
    input: Option<&Path>,
    output: Option<&Path>,
    engine: Option<&str>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = require_input(input)?;

    // Pre-flattened Markdown skips the engine entirely.
    let is_markdown = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("md"));

    let profile = if is_markdown {
        extract::extract_from_markdown(&fs::read_to_string(input)?)
    } else {
        let tree = convert(input, engine)?;
        extract::extract(&flatten::flatten(&tree))
    };

    let json = if compact {
        serde_json::to_string(&profile)?
    } else {
        serde_json::to_string_pretty(&profile)?
    };

    write_or_print(output, &json)
}

fn cmd_image(
    input: Option<&Path>,
    dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = require_input(input)?;

    let Some(image) = cvmark::extract_portrait(input)? else {
        println!("{}", "No portrait image found".yellow());
        return Ok(());
    };

    let output_dir = dir.map(|p| p.to_path_buf()).unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let path = output_dir.join(format!("{}_portrait.{}", stem, image.extension));
    fs::write(&path, &image.data)?;

    println!(
        "{} {} ({} bytes)",
        "Extracted".green(),
        path.display(),
        image.size()
    );

    Ok(())
}

fn cmd_engines() {
    let registry = EngineRegistry::with_defaults();
    let default = registry.default_engine().map(|e| e.name().to_string());

    println!("{}", "Available engines".cyan().bold());
    for name in registry.engine_names() {
        if Some(name) == default.as_deref() {
            println!("  {} {}", name, "(default)".dimmed());
        } else {
            println!("  {}", name);
        }
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}
