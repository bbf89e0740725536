#![cfg(feature = "provider-groq")]

use std::collections::HashMap;
use std::sync::Arc;

use mixchat::{AlwaysAuthorized, ChatConfig, MessageRole, chat_from_config, is_error_entry};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buffer = Vec::new();
        let mut chunk = [0_u8; 4096];
        loop {
            let read = socket.read(&mut chunk).await.expect("read request");
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);
            if request_complete(&buffer) {
                break;
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&buffer).to_string()
    });

    (format!("http://{address}/openai/v1"), handle)
}

fn request_complete(buffer: &[u8]) -> bool {
    let text = String::from_utf8_lossy(buffer);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text[..header_end]
        .lines()
        .find_map(|line| {
            line.to_ascii_lowercase()
                .strip_prefix("content-length:")
                .map(|value| value.trim().parse::<usize>().unwrap_or(0))
        })
        .unwrap_or(0);

    buffer.len() >= header_end + 4 + content_length
}

fn config(base_url: &str) -> ChatConfig {
    let env = HashMap::from([
        ("VITE_GROQ_API_KEY".to_string(), "gsk_e2e".to_string()),
        ("GROQ_API_URL".to_string(), base_url.to_string()),
    ]);
    ChatConfig::from_lookup(|key| env.get(key).cloned()).expect("config")
}

#[tokio::test]
async fn configured_chat_round_trips_through_http() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"model":"llama-3.3-70b-versatile","choices":[{"message":{"role":"assistant","content":"Hi!"},"finish_reason":"stop"}],"usage":{"prompt_tokens":3,"completion_tokens":1,"total_tokens":4}}"#,
    )
    .await;
    let chat = chat_from_config(&config(&base_url), Arc::new(AlwaysAuthorized))
        .await
        .expect("chat");

    let report = chat.submit("Hallo").await.expect("submit");
    let request = server.await.expect("server task");

    assert!(request.starts_with("POST /openai/v1/chat/completions"));
    assert!(request.to_ascii_lowercase().contains("authorization: bearer gsk_e2e"));
    assert!(request.contains(r#""stream":false"#));
    assert_eq!(report.assistant_message.content, "Hi!");

    let snapshot = chat.snapshot();
    assert_eq!(snapshot.messages.len(), 2);
    assert_eq!(snapshot.messages[0].role, MessageRole::User);
    assert_eq!(snapshot.messages[1].content, "Hi!");
    assert!(!snapshot.busy);
}

#[tokio::test]
async fn rate_limited_chat_shows_advisory_entry() {
    let (base_url, server) = serve_once(
        "429 Too Many Requests",
        r#"{"error":{"message":"Rate limit reached for model"}}"#,
    )
    .await;
    let chat = chat_from_config(&config(&base_url), Arc::new(AlwaysAuthorized))
        .await
        .expect("chat");

    chat.submit("Hallo").await.expect("submit settles");
    server.await.expect("server task");

    let snapshot = chat.snapshot();
    assert_eq!(
        snapshot.messages[1].content,
        "Fehler: Rate Limit erreicht. Warte eine Minute."
    );
    assert!(is_error_entry(&snapshot.messages[1]));
    assert!(!snapshot.busy);
}
