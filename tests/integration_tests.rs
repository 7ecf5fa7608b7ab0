//! Integration tests for the ace-explainer library.
//! The live test requires an API key in the environment to run; the rest
//! talk to a one-shot local HTTP server.

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use ace_explainer::chat::{ChatConfig, ChatSession};
    use ace_explainer::export::{Block, build_document, export_transcript};
    use ace_explainer::{Gemini, KnownModel, Model, Transcript, Turn};
    use time::macros::datetime;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves exactly one HTTP response and hands back the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/v1beta", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                request.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&request).to_string();
                if let Some(header_end) = text.find("\r\n\r\n") {
                    let length = text[..header_end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if request.len() >= header_end + 4 + length {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });
        (base_url, handle)
    }

    fn client(base_url: String) -> Gemini {
        Gemini::with_options(
            Some("test-key".to_string()),
            Some(base_url),
            Some(Duration::from_secs(5)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn session_round_trip_against_local_server() {
        let (base_url, server) = serve_once(
            "200 OK",
            r####"{"candidates":[{"content":{"role":"model","parts":[{"text":"### Summary\n1. **MQInput** receives the order"}]},"finishReason":"STOP","index":0}],"usageMetadata":{"promptTokenCount":40,"candidatesTokenCount":12,"totalTokenCount":52}}"####,
        )
        .await;

        let mut session = ChatSession::new(Some(client(base_url)), ChatConfig::default());
        let reply = session.send("SET OutputRoot = InputRoot;").await.unwrap();
        assert_eq!(reply, "### Summary\n1. **MQInput** receives the order");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1beta/models/gemini-2.5-flash:generateContent"));
        assert!(request.to_lowercase().contains("x-goog-api-key: test-key"));
        assert!(request.contains("\"systemInstruction\""));
        assert!(request.contains("\"temperature\":0.3"));

        assert_eq!(session.transcript().len(), 2);
        assert_eq!(session.stats().total_prompt_tokens, 40);
    }

    #[tokio::test]
    async fn provider_errors_keep_the_user_turn() {
        let (base_url, server) = serve_once(
            "429 Too Many Requests",
            r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        )
        .await;

        let mut session = ChatSession::new(Some(client(base_url)), ChatConfig::default());
        let err = session.send("explain this flow").await.unwrap_err();
        server.await.unwrap();

        assert!(err.is_rate_limit());
        assert!(err.is_provider_call());
        assert!(err.to_string().contains("Resource has been exhausted"));
        assert_eq!(session.transcript().len(), 1);
    }

    #[tokio::test]
    async fn invalid_key_is_reported_as_authentication() {
        let (base_url, server) = serve_once(
            "400 Bad Request",
            r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#,
        )
        .await;

        let gemini = client(base_url);
        let request = ace_explainer::GenerateContentRequest::new(vec![
            ace_explainer::Content::user("hello"),
        ]);
        let err = gemini
            .generate_content(&Model::Known(KnownModel::Gemini25Flash), &request)
            .await
            .unwrap_err();
        server.await.unwrap();
        assert!(err.is_authentication());
    }

    #[test]
    fn transcript_exports_as_docx() {
        let transcript: Transcript = vec![
            Turn::user("CREATE COMPUTE MODULE Route\nSET OutputRoot = InputRoot;\nEND MODULE;"),
            Turn::assistant("## Overview\n- **Route** copies the message\n```\nSET x = 1;\n```"),
        ]
        .into_iter()
        .collect();

        let at = datetime!(2026-10-18 09:30:00 UTC);
        let document = build_document(&transcript, at);
        assert!(matches!(&document.blocks()[0], Block::Title(title) if title == "IIB Code Analysis Report"));
        assert!(document
            .blocks()
            .iter()
            .any(|block| matches!(block, Block::CodeLine(line) if line == "SET x = 1;")));

        let export = export_transcript(&transcript, at).unwrap();
        assert_eq!(export.file_name(), format!("IIB_Analysis_{}.docx", at.unix_timestamp()));
        assert_eq!(&export.bytes()[..2], b"PK");
    }

    #[tokio::test]
    async fn live_gemini_explains_esql() {
        // This test requires GOOGLE_API_KEY to be set
        let api_key = std::env::var("GOOGLE_API_KEY").ok();
        if api_key.is_none() {
            eprintln!("Skipping test: GOOGLE_API_KEY not set");
            return;
        }

        let client = Gemini::new(api_key).expect("Failed to create client");
        let mut session = ChatSession::new(Some(client), ChatConfig::default());
        let reply = session
            .send("SET OutputRoot.JSON.Data.status = 'ok';")
            .await;
        assert!(reply.is_ok(), "Request should succeed with valid API key");
        assert_eq!(session.transcript().len(), 2);
    }
}
