use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("devkit MCP server listening on stdio");
    }

    let handled = serve(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        &global,
    )
    .await?;

    log::debug!("mcp stdin closed after {handled} messages");
    Ok(())
}

/// Answer newline-delimited JSON-RPC messages until `input` reaches EOF.
///
/// Returns the number of non-blank lines read.
pub async fn serve<R, W>(input: R, mut output: W, global: &crate::Global) -> Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut handled = 0;
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        handled += 1;

        log::debug!("mcp <- {message}");
        if global.verbose {
            eprintln!("<- {message}");
        }

        let Some(response) = super::handle_message(message, global) else {
            continue;
        };
        let mut frame = serde_json::to_vec(&response)?;

        log::debug!("mcp -> {}", String::from_utf8_lossy(&frame));
        if global.verbose {
            eprintln!("-> {}", String::from_utf8_lossy(&frame));
        }

        frame.push(b'\n');
        output.write_all(&frame).await?;
        output.flush().await?;
    }

    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    async fn exchange(input: &str) -> (usize, Vec<Value>) {
        let global = crate::Global { verbose: false };
        let mut output = Vec::new();
        let handled = serve(input.as_bytes(), &mut output, &global).await.unwrap();
        let responses = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (handled, responses)
    }

    #[tokio::test]
    async fn test_serve_answers_each_request_on_its_own_line() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        let (handled, responses) = exchange(input).await;
        assert_eq!(handled, 3);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["id"], 2);
        assert!(responses[1]["result"].is_object());
    }

    #[tokio::test]
    async fn test_serve_keeps_running_after_errors() {
        let input = concat!(
            "{broken\n",
            r#"{"jsonrpc":"2.0","id":9,"method":"tools/call","params":{"name":"subnet_calculate","arguments":{"cidr":"1.2.3.4/99"}}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":10,"method":"ping"}"#,
        );
        let (handled, responses) = exchange(input).await;
        assert_eq!(handled, 3);
        assert_eq!(responses[0]["error"]["code"], -32700);
        assert_eq!(responses[1]["error"]["code"], -32603);
        assert_eq!(responses[2]["id"], 10);
    }
}
