use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    log::info!("MCP server reading JSON-RPC messages from stdin");

    let mut stdout = tokio::io::stdout();
    serve_lines(BufReader::new(tokio::io::stdin()), &mut stdout, &global).await
}

/// Answer newline-delimited JSON-RPC messages until `reader` hits EOF.
///
/// Blank lines are skipped, and notifications are consumed without writing
/// anything back.
async fn serve_lines<R, W>(reader: R, writer: &mut W, global: &crate::Global) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("<- {message}");
        }

        let Some(response) = super::handle_message(message, global).await else {
            continue;
        };

        let mut encoded = serde_json::to_string(&response)?;
        if global.verbose {
            eprintln!("-> {encoded}");
        }

        encoded.push('\n');
        writer.write_all(encoded.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(())
}
