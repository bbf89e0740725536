#![cfg(all(feature = "provider-groq", feature = "provider-ollama"))]

use std::sync::Arc;
use std::time::Duration;

use mprovider::adapters::groq::{GroqHttpTransport, GroqProvider};
use mprovider::adapters::ollama::{OllamaHttpTransport, OllamaProvider};
use mprovider::{CompletionProvider, ProviderErrorKind, SecureCredentialManager};
use reqwest::Client;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Answers exactly one HTTP request with a canned response and returns the raw request text.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        socket.shutdown().await.ok();
        request
    });

    (format!("http://{address}"), handle)
}

async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 4096];

    loop {
        let read = socket.read(&mut chunk).await.expect("read request");
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let text = String::from_utf8_lossy(&buffer).to_string();
        if let Some(header_end) = text.find("\r\n\r\n") {
            let content_length = text[..header_end]
                .lines()
                .find_map(|line| {
                    let lower = line.to_ascii_lowercase();
                    lower
                        .strip_prefix("content-length:")
                        .map(|value| value.trim().parse::<usize>().unwrap_or(0))
                })
                .unwrap_or(0);

            if buffer.len() >= header_end + 4 + content_length {
                break;
            }
        }
    }

    String::from_utf8_lossy(&buffer).to_string()
}

/// Sends response headers promising a longer body than it ever delivers.
async fn serve_stalled_body(status_line: &'static str) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        read_request(&mut socket).await;

        let head = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: 500\r\n\r\n{{\"choices\":"
        );
        socket.write_all(head.as_bytes()).await.expect("write head");
        tokio::time::sleep(Duration::from_secs(3)).await;
        drop(socket);
    });

    (format!("http://{address}"), handle)
}

fn groq_provider(base_url: String) -> GroqProvider {
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials
        .set_groq_api_key("gsk_test_key")
        .expect("key should set");
    let transport = GroqHttpTransport::new(Client::new()).with_base_url(base_url);
    GroqProvider::new(credentials, Arc::new(transport))
}

#[tokio::test]
async fn groq_success_returns_first_choice_and_sends_expected_request() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"model":"llama-3.3-70b-versatile","choices":[{"message":{"role":"assistant","content":"Hi!"},"finish_reason":"stop"}]}"#,
    )
    .await;
    let provider = groq_provider(format!("{base_url}/openai/v1"));

    let reply = provider
        .generate("Hallo", "")
        .await
        .expect("generate should succeed");
    assert_eq!(reply, "Hi!");

    let request = server.await.expect("server task");
    let lower = request.to_ascii_lowercase();
    assert!(request.starts_with("POST /openai/v1/chat/completions HTTP/1.1"));
    assert!(lower.contains("authorization: bearer gsk_test_key"));
    assert!(lower.contains("content-type: application/json"));
    assert!(request.contains("\"messages\":[{\"role\":\"user\",\"content\":\"Hallo\"}]"));
    assert!(request.contains("\"temperature\":0.7"));
    assert!(request.contains("\"max_tokens\":500"));
    assert!(request.contains("\"stream\":false"));
}

#[tokio::test]
async fn groq_rate_limit_status_maps_to_rate_limited_advisory() {
    let (base_url, server) = serve_once(
        "429 Too Many Requests",
        r#"{"error":{"message":"Rate limit reached for model"}}"#,
    )
    .await;
    let provider = groq_provider(base_url);

    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("rate limit should fail");
    assert_eq!(error.kind, ProviderErrorKind::RateLimited);
    assert_eq!(error.message, "Rate Limit erreicht. Warte eine Minute.");
    server.await.expect("server task");
}

#[tokio::test]
async fn groq_error_payload_message_is_passed_through() {
    let (base_url, server) = serve_once(
        "400 Bad Request",
        r#"{"error":{"message":"The model `x` does not exist","type":"invalid_request_error"}}"#,
    )
    .await;
    let provider = groq_provider(base_url);

    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("bad request should fail");
    assert_eq!(error.kind, ProviderErrorKind::Provider);
    assert_eq!(error.message, "The model `x` does not exist");
    server.await.expect("server task");
}

#[tokio::test]
async fn groq_error_without_payload_uses_generic_message() {
    let (base_url, server) = serve_once("502 Bad Gateway", "upstream down").await;
    let provider = groq_provider(base_url);

    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("bad gateway should fail");
    assert_eq!(error.kind, ProviderErrorKind::Provider);
    assert_eq!(error.message, "Groq API Fehler");
    server.await.expect("server task");
}

#[tokio::test]
async fn groq_connection_refused_maps_to_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    drop(listener);

    let provider = groq_provider(format!("http://{address}"));
    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("refused connection should fail");
    assert_eq!(error.kind, ProviderErrorKind::Network);
    assert!(!error.message.is_empty());
}

#[tokio::test]
async fn groq_timeout_maps_to_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.expect("accept");
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(socket);
    });

    let credentials = Arc::new(SecureCredentialManager::new());
    credentials.set_groq_api_key("gsk_test_key").expect("key");
    let transport = GroqHttpTransport::new(Client::new())
        .with_base_url(format!("http://{address}"))
        .with_timeout(Duration::from_millis(200));
    let provider = GroqProvider::new(credentials, Arc::new(transport));

    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("stalled server should time out");
    assert_eq!(error.kind, ProviderErrorKind::Network);
    server.abort();
}

#[tokio::test]
async fn groq_stalled_body_maps_to_network_error() {
    let (base_url, server) = serve_stalled_body("200 OK").await;
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials.set_groq_api_key("gsk_test_key").expect("key");
    let transport = GroqHttpTransport::new(Client::new())
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(500));
    let provider = GroqProvider::new(credentials, Arc::new(transport));

    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("stalled body should time out");
    assert_eq!(error.kind, ProviderErrorKind::Network);
    assert_ne!(error.message, "Groq API Fehler");
    assert!(error.retryable);
    server.abort();
}

#[tokio::test]
async fn groq_stalled_error_body_maps_to_network_error() {
    let (base_url, server) = serve_stalled_body("500 Internal Server Error").await;
    let credentials = Arc::new(SecureCredentialManager::new());
    credentials.set_groq_api_key("gsk_test_key").expect("key");
    let transport = GroqHttpTransport::new(Client::new())
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(500));
    let provider = GroqProvider::new(credentials, Arc::new(transport));

    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("stalled error body should time out");
    assert_eq!(error.kind, ProviderErrorKind::Network);
    server.abort();
}

#[tokio::test]
async fn groq_undecodable_success_body_stays_a_provider_error() {
    let (base_url, server) = serve_once("200 OK", "not json").await;
    let provider = groq_provider(base_url);

    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("garbage body should fail");
    assert_eq!(error.kind, ProviderErrorKind::Provider);
    assert_eq!(error.message, "Groq API Fehler");
    server.await.expect("server task");
}

#[tokio::test]
async fn ollama_stalled_body_maps_to_network_error() {
    let (base_url, server) = serve_stalled_body("200 OK").await;
    let transport = OllamaHttpTransport::new(Client::new())
        .with_base_url(base_url)
        .with_timeout(Duration::from_millis(500));
    let provider = OllamaProvider::new(Arc::new(transport));

    let error = provider
        .generate("Hallo", "")
        .await
        .expect_err("stalled body should time out");
    assert_eq!(error.kind, ProviderErrorKind::Network);
    assert_ne!(error.message, "Failed to generate response");
    server.abort();
}

#[tokio::test]
async fn ollama_generate_reads_response_field() {
    let (base_url, server) = serve_once(
        "200 OK",
        r#"{"model":"llama-3.3-70b-versatile","response":"Hallo zurück","done":true}"#,
    )
    .await;
    let transport = OllamaHttpTransport::new(Client::new()).with_base_url(base_url);
    let provider = OllamaProvider::new(Arc::new(transport));

    let reply = provider
        .generate("Wer bist du?", "Ein Test")
        .await
        .expect("generate should succeed");
    assert_eq!(reply, "Hallo zurück");

    let request = server.await.expect("server task");
    assert!(request.starts_with("POST /api/generate HTTP/1.1"));
    assert!(request.contains(r#""prompt":"Context: Ein Test\n\nQuestion: Wer bist du?\n\nAnswer:""#));
    assert!(request.contains("\"stream\":false"));
    assert!(!request.to_ascii_lowercase().contains("authorization:"));
}

#[tokio::test]
async fn ollama_health_check_is_true_when_tags_respond() {
    let (base_url, server) =
        serve_once("200 OK", r#"{"models":[{"name":"mistral:7b-instruct"}]}"#).await;
    let transport = OllamaHttpTransport::new(Client::new()).with_base_url(base_url);
    let provider = OllamaProvider::new(Arc::new(transport));

    assert!(provider.check_health().await);
    let request = server.await.expect("server task");
    assert!(request.starts_with("GET /api/tags HTTP/1.1"));
}

#[tokio::test]
async fn ollama_health_check_is_false_when_unreachable() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let address = listener.local_addr().expect("local addr");
    drop(listener);

    let transport =
        OllamaHttpTransport::new(Client::new()).with_base_url(format!("http://{address}"));
    let provider = OllamaProvider::new(Arc::new(transport));

    assert!(!provider.check_health().await);
}
