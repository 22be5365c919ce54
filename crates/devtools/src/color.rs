use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use devtools_core::color::{
    parse_and_normalize, palette, ColorConversion, ColorFormat, Rgb, DEFAULT_PALETTE_COUNT,
};

#[derive(Debug, clap::Parser)]
#[command(name = "color")]
#[command(about = "Convert colors between HEX, RGB and HSL")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Show a color in HEX, RGB and HSL notation
    #[clap(name = "convert")]
    Convert(ConvertOptions),

    /// Generate shades and tints of a base color
    #[clap(name = "palette")]
    Palette(PaletteOptions),
}

#[derive(Debug, clap::Args)]
pub struct ConvertOptions {
    /// Color as "#RRGGBB", "#RGB", "rgb(r, g, b)" or "hsl(h, s%, l%)"
    color: String,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, clap::Args)]
pub struct PaletteOptions {
    /// Base color in any supported notation
    base_color: String,

    /// Number of shades and of tints to generate (1-20)
    #[arg(short, long, default_value_t = DEFAULT_PALETTE_COUNT)]
    count: usize,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(app: App, global: crate::Global) -> Result<()> {
    match app.command {
        Commands::Convert(options) => convert(options, global),
        Commands::Palette(options) => generate_palette(options, global),
    }
}

fn convert(options: ConvertOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!(
            "Detected format: {:?}",
            ColorFormat::detect(options.color.trim())
        );
    }

    let color = parse_and_normalize(&options.color).map_err(|e| eyre!(e))?;
    let conversion = ColorConversion::from(&color);

    if options.json {
        return print_json(&conversion);
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["Preview", swatch(color.rgb())]);
    table.add_row(prettytable::row!["HEX", conversion.hex]);
    table.add_row(prettytable::row!["RGB", conversion.rgb]);
    table.add_row(prettytable::row!["HSL", conversion.hsl]);
    table.printstd();

    Ok(())
}

fn generate_palette(options: PaletteOptions, global: crate::Global) -> Result<()> {
    let base = parse_and_normalize(&options.base_color).map_err(|e| eyre!(e))?;
    let result = palette(&base, options.count).map_err(|e| eyre!(e))?;

    if global.verbose {
        eprintln!(
            "Base {} with {} step(s) each way",
            base.hex(),
            options.count
        );
    }

    if options.json {
        return print_json(&result);
    }

    let mut table = new_table();
    table.add_row(prettytable::row![
        "Step".bold().cyan(),
        "Shade".bold().cyan(),
        "",
        "Tint".bold().cyan(),
        ""
    ]);

    for (index, (shade, tint)) in result.shades.iter().zip(&result.tints).enumerate() {
        table.add_row(prettytable::row![
            index + 1,
            shade,
            swatch_hex(shade),
            tint,
            swatch_hex(tint)
        ]);
    }

    println!("\nPalette for {}\n", base.hex());
    table.printstd();

    Ok(())
}

fn swatch(rgb: Rgb) -> String {
    "      ".on_truecolor(rgb.r, rgb.g, rgb.b).to_string()
}

fn swatch_hex(hex: &str) -> String {
    parse_and_normalize(hex)
        .map(|color| swatch(color.rgb()))
        .unwrap_or_default()
}
