#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
#[command(about = "Expose the utilities as Model Context Protocol tools")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Read newline-delimited JSON-RPC messages on stdin, answer on stdout
    #[clap(name = "stdio")]
    Stdio,

    /// Announce a message endpoint over SSE and answer POSTed JSON-RPC messages
    #[clap(name = "sse")]
    Sse(SseOptions),
}

/// Where the SSE transport listens
#[derive(Debug, clap::Args)]
pub struct SseOptions {
    /// Port for the /sse and /message endpoints
    #[arg(short, long, env = "DEVTOOLS_MCP_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "DEVTOOLS_HOST", default_value = "127.0.0.1")]
    pub host: String,
}
