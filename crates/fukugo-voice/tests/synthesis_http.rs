//! Integration tests for `HttpSynthesisClient` against a loopback server.
//!
//! Each test starts a small axum app on an ephemeral port that imitates one
//! behavior of the synthesis service: success, a JSON error body, a wrong
//! content type, an empty payload, or a slow answer.

use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::post;
use fukugo_core::{SpeechSynthesizer, TtsSettings};
use fukugo_voice::HttpSynthesisClient;
use serde_json::{Value, json};

// ── Helpers ────────────────────────────────────────────────────────

/// Serve `router` on 127.0.0.1 and return the synthesis endpoint URL.
async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/tts")
}

fn client_for(endpoint: String) -> HttpSynthesisClient {
    HttpSynthesisClient::new(&TtsSettings {
        endpoint,
        ..TtsSettings::default()
    })
    .unwrap()
}

/// Answers with `voice|text` as an mp3 payload.
async fn echo(Json(body): Json<Value>) -> impl IntoResponse {
    let text = body["text"].as_str().unwrap_or_default();
    let voice = body["voice"].as_str().unwrap_or_default();
    ([(CONTENT_TYPE, "audio/mpeg")], format!("{voice}|{text}").into_bytes())
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test]
async fn posts_text_and_voice_and_returns_audio() {
    let endpoint = serve(Router::new().route("/api/tts", post(echo))).await;
    let client = client_for(endpoint);

    let audio = client.synthesize("食べる", "ja-JP-NanamiNeural").await.unwrap();

    assert_eq!(audio, "ja-JP-NanamiNeural|食べる".as_bytes());
}

#[tokio::test]
async fn service_error_body_is_reported() {
    let router = Router::new().route(
        "/api/tts",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "TTS generation failed" })),
            )
        }),
    );
    let client = client_for(serve(router).await);

    let err = client.synthesize("食べる", "ja-JP-NanamiNeural").await.unwrap_err();

    assert!(err.message().contains("500"), "got: {err}");
    assert!(err.message().contains("TTS generation failed"), "got: {err}");
}

#[tokio::test]
async fn non_audio_content_type_is_rejected() {
    let router = Router::new().route(
        "/api/tts",
        post(|| async { ([(CONTENT_TYPE, "text/html")], "<html>oops</html>") }),
    );
    let client = client_for(serve(router).await);

    let err = client.synthesize("食べる", "ja-JP-NanamiNeural").await.unwrap_err();

    assert!(err.message().contains("text/html"), "got: {err}");
}

#[tokio::test]
async fn empty_payload_is_rejected() {
    let router = Router::new().route(
        "/api/tts",
        post(|| async { ([(CONTENT_TYPE, "audio/mpeg")], Vec::<u8>::new()) }),
    );
    let client = client_for(serve(router).await);

    let err = client.synthesize("食べる", "ja-JP-NanamiNeural").await.unwrap_err();

    assert!(err.message().contains("empty"), "got: {err}");
}

#[tokio::test]
async fn connection_refused_is_a_synthesis_error() {
    // Reserve a port, then free it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(format!("http://{addr}/api/tts"));
    let err = client.synthesize("食べる", "ja-JP-NanamiNeural").await.unwrap_err();

    assert!(err.message().starts_with("request failed"), "got: {err}");
}

#[tokio::test]
async fn configured_timeout_bounds_the_request() {
    let router = Router::new().route(
        "/api/tts",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            ([(CONTENT_TYPE, "audio/mpeg")], b"late".to_vec())
        }),
    );
    let endpoint = serve(router).await;
    let client = HttpSynthesisClient::new(&TtsSettings {
        endpoint,
        timeout_secs: Some(1),
        ..TtsSettings::default()
    })
    .unwrap();

    let err = client.synthesize("食べる", "ja-JP-NanamiNeural").await.unwrap_err();

    assert!(err.message().starts_with("request failed"), "got: {err}");
}
