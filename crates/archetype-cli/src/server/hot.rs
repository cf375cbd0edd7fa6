// Copyright 2019-2026 Maravilla Labs, operated by SOLUTAS GmbH, Switzerland
// SPDX-License-Identifier: Apache-2.0
// SPDX-License-Identifier: MIT

//! Hot-reload middleware: pushes compiler events over a WebSocket.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tokio::sync::broadcast;
use tracing::debug;

use crate::compiler::{CompileState, Compiler, CompilerEvent};

/// Upgrades the request and streams the compiler's events to the client.
pub async fn hot_handler(
    ws: WebSocketUpgrade,
    State(compiler): State<Arc<Compiler>>,
) -> impl IntoResponse {
    // Subscribe before upgrading so no event between the two is lost.
    let rx = compiler.subscribe();
    let sync = match compiler.state().await {
        CompileState::Built(stats) => Some(CompilerEvent::Sync { hash: stats.hash }),
        _ => None,
    };
    ws.on_upgrade(move |socket| handle_websocket(socket, rx, sync))
}

/// Client that reloads the page once a new build is available.
const HOT_CLIENT: &str = r#"
<script>
(function() {
    var protocol = window.location.protocol === 'https:' ? 'wss:' : 'ws:';
    var ws = new WebSocket(protocol + '//' + window.location.host + '%hot_path%');
    var hash = null;
    ws.onmessage = function(event) {
        var message = JSON.parse(event.data);
        if (message.action === 'sync') {
            hash = message.hash;
        } else if (message.action === 'built' && message.hash !== hash) {
            console.log('[archetype] Rebuilt, reloading...');
            window.location.reload();
        } else if (message.action === 'failed') {
            console.error('[archetype] Build failed:', message.message);
        }
    };
    ws.onclose = function() {
        console.log('[archetype] Connection lost, attempting to reconnect...');
        setTimeout(function() {
            window.location.reload();
        }, 1000);
    };
})();
</script>
"#;

/// Adds the hot client to an HTML page, before `</body>` when there is one.
pub fn inject_hot_client(html: &str, hot_path: &str) -> String {
    let script = HOT_CLIENT.replace("%hot_path%", hot_path);
    let lower = html.to_lowercase();

    match lower.rfind("</body>").or_else(|| lower.rfind("</html>")) {
        Some(pos) => {
            let mut result = html.to_string();
            result.insert_str(pos, &script);
            result
        }
        None => format!("{}{}", html, script),
    }
}

fn encode(event: &CompilerEvent) -> Option<Message> {
    serde_json::to_string(event).ok().map(Message::Text)
}

/// Handles a WebSocket connection for hot-reload notifications.
pub async fn handle_websocket(
    mut socket: WebSocket,
    mut rx: broadcast::Receiver<CompilerEvent>,
    sync: Option<CompilerEvent>,
) {
    debug!("hot client connected");

    if let Some(message) = sync.as_ref().and_then(encode) {
        if socket.send(message).await.is_err() {
            return;
        }
    }

    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(event) => {
                        let Some(message) = encode(&event) else { continue };
                        if socket.send(message).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    // Missed events are superseded by the next one
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(Message::Ping(data))) => {
                        if socket.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(_)) => break,
                }
            }
        }
    }

    debug!("hot client disconnected");
}
