use crate::prelude::*;
use clap::Parser;

mod color;
mod error;
mod json;
mod mcp;
mod password;
mod prelude;
mod serve;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Developer utilities: color conversion, password tools and JSON helpers"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "DEVTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Convert colors between HEX, RGB and HSL and build palettes
    Color(crate::color::App),

    /// Check password strength or generate secure passwords
    Password(crate::password::App),

    /// Validate, format and diff JSON documents
    Json(crate::json::App),

    /// Serve the utilities as a REST API
    Serve(crate::serve::App),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Color(sub_app) => crate::color::run(sub_app, app.global).await,
        SubCommands::Password(sub_app) => crate::password::run(sub_app, app.global).await,
        SubCommands::Json(sub_app) => crate::json::run(sub_app, app.global).await,
        SubCommands::Serve(sub_app) => crate::serve::run(sub_app, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
