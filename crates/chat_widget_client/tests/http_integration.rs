//! Integration tests for the Answer Service client and the widget controller
//! against a minimal in-process HTTP server (no mocks).

use chat_widget_client::{
    AnswerClient, ChatPanel, ChatWidget, ClientError, Sender, API_ERROR_FALLBACK,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

fn header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

/// Read one HTTP request (headers plus Content-Length body).
async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(end) = header_end(&buf) {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let len = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Serve one request with `status` and `body`. The handle yields the raw request.
async fn spawn_server(
    status: &'static str,
    body: &'static str,
) -> (String, tokio::task::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let request = read_request(&mut stream).await;
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
        request
    });
    (format!("http://127.0.0.1:{}/chat", port), handle)
}

fn closed_port_url() -> String {
    let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = l.local_addr().unwrap().port();
    drop(l);
    format!("http://127.0.0.1:{}/chat", port)
}

fn widget_with_input(text: &str) -> ChatWidget<ChatPanel> {
    let mut panel = ChatPanel::new();
    panel.set_input(text);
    ChatWidget::new(panel)
}

#[tokio::test]
async fn posts_question_as_json() {
    let (url, server) = spawn_server("200 OK", r#"{"answer":"Hi there"}"#).await;
    let client = AnswerClient::new(url, None);

    let answer = client.ask("Hello").await.expect("ask should succeed");
    assert_eq!(answer.text, "Hi there");
    assert!(answer.sources.is_empty());

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /chat HTTP/1.1"));
    assert!(request
        .to_lowercase()
        .contains("content-type: application/json"));
    assert!(request.ends_with(r#"{"question":"Hello"}"#));
}

#[tokio::test]
async fn session_id_and_sources_round_trip() {
    let (url, server) =
        spawn_server("200 OK", r#"{"answer":"ok","source":["manual.pdf"]}"#).await;
    let client = AnswerClient::new(url, Some("s-1".into()));

    let answer = client.ask("q").await.unwrap();
    assert_eq!(answer.sources, vec!["manual.pdf"]);

    let request = server.await.unwrap();
    assert!(request.ends_with(r#"{"question":"q","session_id":"s-1"}"#));
}

#[tokio::test]
async fn submit_hello_renders_answer() {
    let (url, _server) = spawn_server("200 OK", r#"{"answer":"Hi there"}"#).await;
    let client = AnswerClient::new(url, None);
    let mut widget = widget_with_input("Hello");

    widget.submit(&client).await;

    let panel = widget.view();
    let texts: Vec<&str> = panel.messages().map(|m| m.text.as_str()).collect();
    assert_eq!(texts, vec!["Hello", "Hi there"]);
    assert!(panel.messages().all(|m| !m.is_loading));
    assert_eq!(panel.last_message().unwrap().sender, Sender::Bot);
    assert!(panel.send_enabled());
}

#[tokio::test]
async fn api_error_detail_is_shown() {
    let (url, _server) = spawn_server(
        "500 Internal Server Error",
        r#"{"detail":"Service unavailable"}"#,
    )
    .await;
    let client = AnswerClient::new(url, None);

    let err = client.ask("Hello").await.unwrap_err();
    assert_eq!(
        err,
        ClientError::Api {
            status: 500,
            message: "Service unavailable".into()
        }
    );
}

#[tokio::test]
async fn api_error_detail_reaches_transcript() {
    let (url, _server) = spawn_server(
        "500 Internal Server Error",
        r#"{"detail":"Service unavailable"}"#,
    )
    .await;
    let client = AnswerClient::new(url, None);
    let mut widget = widget_with_input("Hello");

    widget.submit(&client).await;

    assert_eq!(
        widget.view().last_message().unwrap().text,
        "Erro: Service unavailable"
    );
    assert_eq!(widget.view().len(), 2);
}

#[tokio::test]
async fn api_error_without_detail_uses_fallback() {
    let (url, _server) = spawn_server("500 Internal Server Error", "Internal Server Error").await;
    let client = AnswerClient::new(url, None);
    let mut widget = widget_with_input("Hello");

    widget.submit(&client).await;

    assert_eq!(
        widget.view().last_message().unwrap().text,
        format!("Erro: {}", API_ERROR_FALLBACK)
    );
    assert_eq!(
        widget.view().last_message().unwrap().text,
        "Erro: Ocorreu um erro na API."
    );
}

#[tokio::test]
async fn connection_refused_shows_transport_error() {
    let client = AnswerClient::new(closed_port_url(), None);

    let err = client.ask("Hello").await.unwrap_err();
    let text = match &err {
        ClientError::Transport(t) => t.clone(),
        other => panic!("expected transport error, got {:?}", other),
    };
    assert!(!text.is_empty());

    let mut widget = widget_with_input("Hello");
    widget.submit(&client).await;
    let last = widget.view().last_message().unwrap();
    assert_eq!(last.text, format!("Erro: {}", text));
    assert!(widget.view().messages().all(|m| !m.is_loading));
    assert!(widget.view().send_enabled());
}

#[tokio::test]
async fn malformed_success_body_is_an_error() {
    let (url, _server) = spawn_server("200 OK", r#"{"reply":"wrong field"}"#).await;
    let client = AnswerClient::new(url, None);

    let err = client.ask("Hello").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
}
