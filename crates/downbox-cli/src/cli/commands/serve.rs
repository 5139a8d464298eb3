//! `downbox serve` – line-delimited JSON method calls on stdin/stdout.

use anyhow::Result;
use downbox_core::channel::{dispatch, MethodCall, MethodReply};
use downbox_core::save::SaveHandler;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Reads one JSON method call per line and writes one JSON reply per
/// line. A malformed line gets an INVALID_ARGS error reply; EOF ends
/// the loop.
pub async fn run_serve(handler: &SaveHandler) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(stdin).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let reply = match MethodCall::from_json(line) {
            Ok(call) => dispatch(handler, call).await,
            Err(e) => MethodReply::malformed(&e),
        };
        let mut out = reply.to_json()?.into_bytes();
        out.push(b'\n');
        stdout.write_all(&out).await?;
        stdout.flush().await?;
    }
    Ok(())
}
