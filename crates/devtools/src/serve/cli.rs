#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Serve the utilities as a REST API")]
pub struct App {
    /// Port to listen on
    #[arg(short, long, env = "DEVTOOLS_PORT", default_value = "8000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "DEVTOOLS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Allowed CORS origins (comma separated, "*" allows any origin)
    #[arg(
        long = "cors-origin",
        env = "DEVTOOLS_CORS_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:3000,http://127.0.0.1:3000"
    )]
    pub cors_origins: Vec<String>,
}
