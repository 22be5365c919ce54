use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devtools_core::json::{diff_json, validate_json, JsonDiff};
use std::io::Read;

#[derive(Debug, clap::Parser)]
#[command(name = "json")]
#[command(about = "Validate, format and diff JSON documents")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Validate a JSON document and print it in canonical form
    #[clap(name = "validate")]
    Validate(ValidateOptions),

    /// Compare the top-level keys of two JSON objects
    #[clap(name = "diff")]
    Diff(DiffOptions),
}

#[derive(Debug, clap::Args)]
pub struct ValidateOptions {
    /// Path to a JSON file, or "-" to read stdin
    #[arg(default_value = "-")]
    input: String,

    /// Output the validation result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args)]
pub struct DiffOptions {
    /// Path to the original JSON file
    left: String,

    /// Path to the changed JSON file
    right: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Validate(options) => validate(options, global),
        Commands::Diff(options) => diff(options, global),
    }
}

fn read_input(source: &str) -> Result<String> {
    read_source(source, std::io::stdin())
}

/// Read `source` as a file path, or all of `stdin` when it is `-`.
fn read_source(source: &str, mut stdin: impl Read) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        stdin
            .read_to_string(&mut buffer)
            .context("Failed to read JSON from stdin")?;
        return Ok(buffer);
    }

    std::fs::read_to_string(source).with_context(|| f!("Failed to read file '{source}'"))
}

fn validate(options: ValidateOptions, global: crate::Global) -> Result<()> {
    let text = read_input(&options.input)?;

    if global.verbose {
        eprintln!("Read {} bytes from {}", text.len(), options.input);
    }

    let result = validate_json(&text);

    if options.json {
        return print_json(&result);
    }

    match (result.formatted, result.error) {
        (Some(formatted), _) => {
            println!("{}", formatted);
            Ok(())
        }
        (None, error) => Err(eyre!(
            "Invalid JSON: {}",
            error.unwrap_or_else(|| "unknown error".to_string())
        )),
    }
}

fn diff(options: DiffOptions, global: crate::Global) -> Result<()> {
    let left = read_input(&options.left)?;
    let right = read_input(&options.right)?;

    let result = diff_json(&left, &right).map_err(|e| eyre!(e))?;

    if global.verbose {
        eprintln!(
            "{} added, {} removed, {} modified",
            result.added.len(),
            result.removed.len(),
            result.modified.len()
        );
    }

    if options.json {
        return print_json(&result);
    }

    print_diff(&result);
    Ok(())
}

fn print_diff(result: &JsonDiff) {
    for line in render_diff(result) {
        println!("{}", line);
    }
}

fn render_diff(result: &JsonDiff) -> Vec<String> {
    if result.is_empty() {
        return vec!["No top-level differences.".to_string()];
    }

    let added = result
        .added
        .iter()
        .map(|(key, value)| f!("+ {key}: {value}").green().to_string());

    let removed = result
        .removed
        .iter()
        .map(|(key, value)| f!("- {key}: {value}").red().to_string());

    let modified = result.modified.iter().map(|(key, change)| {
        f!("~ {key}: {} -> {}", change.old, change.new)
            .yellow()
            .to_string()
    });

    added.chain(removed).chain(modified).collect()
}
