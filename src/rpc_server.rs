//! BrewBrowser RPC server: JSON-RPC over stdin/stdout for a UI shell.
//!
//! Protocol: one JSON object per line (newline-delimited JSON).
//! Request:  {"id":1, "method":"list.search", "params":{"text":"ipa"}}
//! Response: {"id":1, "result":{...}} or {"id":1, "error":"..."}

use brewbrowser::app::App;
use brewbrowser::logging;
use brewbrowser::rpc_handler::handle_method;

use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

async fn write_line(stdout: &mut io::Stdout, value: &Value) -> std::io::Result<()> {
    let mut line = value.to_string();
    line.push('\n');
    stdout.write_all(line.as_bytes()).await?;
    stdout.flush().await
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logger();

    // The database location honours BREWBROWSER_DATA_DIR.
    let app = App::new(None, None).map_err(|e| {
        error!(error = %e, "failed to initialise");
        e
    })?;

    let mut stdout = io::stdout();
    write_line(
        &mut stdout,
        &json!({"event": "ready", "version": env!("CARGO_PKG_VERSION")}),
    )
    .await?;
    info!("rpc server ready");

    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let req: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                write_line(&mut stdout, &json!({"id": null, "error": format!("parse error: {}", e)}))
                    .await?;
                continue;
            }
        };

        let id = req.get("id").cloned().unwrap_or(Value::Null);
        let method = req.get("method").and_then(|v| v.as_str()).unwrap_or("");
        let params = req.get("params").cloned().unwrap_or(json!({}));

        let response = match handle_method(&app, method, &params).await {
            Ok(val) => json!({"id": id, "result": val}),
            Err(err) => json!({"id": id, "error": err}),
        };
        write_line(&mut stdout, &response).await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
