use crate::prelude::{eprintln, println, *};
use colored::{ColoredString, Colorize};
use devtools_core::password::{
    analyze, generate_password, PasswordOptions, Strength, DEFAULT_GENERATED_LENGTH,
};
use std::io::BufRead;

#[derive(Debug, clap::Parser)]
#[command(name = "password")]
#[command(about = "Check password strength or generate secure passwords")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Score a password and suggest improvements
    #[clap(name = "check")]
    Check(CheckOptions),

    /// Generate a password from a cryptographically secure source
    #[clap(name = "generate")]
    Generate(GenerateOptions),
}

#[derive(Debug, clap::Args)]
pub struct CheckOptions {
    /// Password to analyze, or "-" to read one line from stdin. Prefer stdin or
    /// DEVTOOLS_PASSWORD: a literal argument is visible in process listings.
    #[arg(env = "DEVTOOLS_PASSWORD", hide_env_values = true, default_value = "-")]
    password: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args)]
pub struct GenerateOptions {
    /// Number of characters (8-128)
    #[arg(
        short,
        long,
        env = "DEVTOOLS_PASSWORD_LENGTH",
        default_value_t = DEFAULT_GENERATED_LENGTH
    )]
    length: usize,

    /// Leave out uppercase letters
    #[arg(long)]
    no_uppercase: bool,

    /// Leave out lowercase letters
    #[arg(long)]
    no_lowercase: bool,

    /// Leave out digits
    #[arg(long)]
    no_numbers: bool,

    /// Leave out symbols
    #[arg(long)]
    no_symbols: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

impl From<&GenerateOptions> for PasswordOptions {
    fn from(options: &GenerateOptions) -> Self {
        Self {
            length: options.length,
            include_uppercase: !options.no_uppercase,
            include_lowercase: !options.no_lowercase,
            include_numbers: !options.no_numbers,
            include_symbols: !options.no_symbols,
        }
    }
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Check(options) => check(options),
        Commands::Generate(options) => generate(options, global),
    }
}

fn check(options: CheckOptions) -> Result<()> {
    let password = resolve_password(options.password, std::io::stdin().lock())?;
    let analysis = analyze(&password).map_err(|e| eyre!(e))?;

    if options.json {
        return print_json(&analysis);
    }

    let yes_no = |flag: bool| if flag { "yes" } else { "no" };

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Strength",
        colorize_strength(analysis.strength)
    ]);
    table.add_row(prettytable::row!["Score", f!("{}/100", analysis.score)]);
    table.add_row(prettytable::row!["Length", analysis.length]);
    table.add_row(prettytable::row!["Entropy", f!("{:.2} bits", analysis.entropy)]);
    table.add_row(prettytable::row!["Uppercase", yes_no(analysis.has_uppercase)]);
    table.add_row(prettytable::row!["Lowercase", yes_no(analysis.has_lowercase)]);
    table.add_row(prettytable::row!["Numbers", yes_no(analysis.has_numbers)]);
    table.add_row(prettytable::row!["Symbols", yes_no(analysis.has_symbols)]);
    table.printstd();

    if !analysis.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &analysis.suggestions {
            println!("  - {}", suggestion);
        }
    }

    Ok(())
}

/// `-` means "read the first line of `stdin`", without its line ending.
fn resolve_password(argument: String, mut stdin: impl BufRead) -> Result<String> {
    if argument != "-" {
        return Ok(argument);
    }

    let mut line = String::new();
    stdin
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn generate(options: GenerateOptions, global: crate::Global) -> Result<()> {
    let password_options = PasswordOptions::from(&options);

    if global.verbose {
        eprintln!(
            "Charset size: {} characters",
            password_options.charset().len()
        );
    }

    let generated = generate_password(&password_options).map_err(|e| eyre!(e))?;

    if options.json {
        return print_json(&generated);
    }

    println!("{}", generated.password);

    if global.verbose {
        eprintln!("Strength score: {}/100", generated.strength_score);
    }

    Ok(())
}

fn colorize_strength(strength: Strength) -> ColoredString {
    match strength {
        Strength::Weak => strength.as_str().red().bold(),
        Strength::Medium => strength.as_str().yellow().bold(),
        Strength::Strong => strength.as_str().green(),
        Strength::VeryStrong => strength.as_str().green().bold(),
    }
}
