//! 端到端测试：在进程内驱动 axum Router

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt;

use radioplay::application::{
    GenerateContentHandler, GenerativeError, GenerativeModelPort, MixAudioHandler,
};
use radioplay::domain::audio::{encode_wav, WAV_HEADER_LEN};
use radioplay::domain::mix::MixSettings;
use radioplay::infrastructure::adapters::{FileBackgroundTrack, FileStaging, SymphoniaDecoder};
use radioplay::infrastructure::http::{build_router, AppState};

const RATE: u32 = 24_000;

/// 上游始终返回配额错误
struct ExhaustedModel;

#[async_trait]
impl GenerativeModelPort for ExhaustedModel {
    async fn generate_content(
        &self,
        _api_key: &str,
        _model: &str,
        _request_body: &Value,
    ) -> Result<Value, GenerativeError> {
        Err(GenerativeError::Http {
            status: 429,
            message: "Resource exhausted".to_string(),
        })
    }
}

struct TestApp {
    router: Router,
    staging_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestApp {
    async fn new(background: Option<Vec<u8>>) -> Self {
        Self::with_body_limit(background, 50 * 1024 * 1024).await
    }

    async fn with_body_limit(background: Option<Vec<u8>>, body_limit_bytes: usize) -> Self {
        let temp_dir = tempfile::tempdir().unwrap();
        let staging_dir = temp_dir.path().join("staging");
        let background_path = temp_dir.path().join("background.wav");
        if let Some(data) = background {
            std::fs::write(&background_path, data).unwrap();
        }

        let decoder = Arc::new(SymphoniaDecoder::new());
        let staging = Arc::new(FileStaging::new(&staging_dir).await.unwrap());
        let background = Arc::new(FileBackgroundTrack::new(background_path, decoder.clone()));

        let state = AppState::new(
            MixAudioHandler::new(staging, decoder, background, MixSettings::default()),
            GenerateContentHandler::new(
                Arc::new(ExhaustedModel),
                vec!["key-a".to_string(), "key-b".to_string()],
            ),
        );

        Self {
            router: build_router(Arc::new(state), body_limit_bytes),
            staging_dir,
            _temp_dir: temp_dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        (status, headers, body)
    }

    async fn mix(&self, payload: Value) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        self.send(json_request("/api/mix-audio", payload)).await
    }

    fn staged_entries(&self) -> usize {
        count_entries(&self.staging_dir)
    }
}

fn count_entries(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|d| d.count()).unwrap_or(0)
}

fn json_request(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

/// 440Hz 正弦波
fn tone(secs: f64) -> Vec<i16> {
    let frames = (secs * RATE as f64) as usize;
    (0..frames)
        .map(|i| {
            let t = i as f64 / RATE as f64;
            ((2.0 * std::f64::consts::PI * 440.0 * t).sin() * 8000.0).round() as i16
        })
        .collect()
}

fn pcm_of(wav: &[u8]) -> Vec<i16> {
    wav[WAV_HEADER_LEN..]
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect()
}

fn data_size(wav: &[u8]) -> u32 {
    u32::from_le_bytes([wav[40], wav[41], wav[42], wav[43]])
}

fn three_tones() -> (Vec<Vec<i16>>, Value) {
    let tones = vec![tone(2.0), tone(1.5), tone(3.0)];
    let encoded: Vec<String> = tones
        .iter()
        .map(|t| STANDARD.encode(encode_wav(t, RATE).unwrap()))
        .collect();
    (tones, json!({ "audioSegments": encoded }))
}

#[tokio::test]
async fn test_narration_only_is_byte_exact_concatenation() {
    let app = TestApp::new(None).await;
    let (tones, payload) = three_tones();

    let (status, headers, body) = app.mix(payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "audio/wav");
    assert_eq!(
        headers[header::CONTENT_LENGTH],
        body.len().to_string().as_str()
    );
    assert_eq!(&body[0..4], b"RIFF");
    assert_eq!(data_size(&body), 312_000);
    assert_eq!(body.len(), WAV_HEADER_LEN + 312_000);

    let expected: Vec<i16> = tones.concat();
    assert_eq!(pcm_of(&body), expected);
    assert_eq!(app.staged_entries(), 0);
}

#[tokio::test]
async fn test_background_is_looped_and_faded() {
    let background = encode_wav(&vec![10_000i16; 4 * RATE as usize], RATE).unwrap();
    let app = TestApp::new(Some(background)).await;
    let (tones, payload) = three_tones();

    let (status, _, body) = app.mix(payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(data_size(&body), 312_000);

    let narration: Vec<i16> = tones.concat();
    let residual: Vec<i32> = pcm_of(&body)
        .iter()
        .zip(&narration)
        .map(|(&mixed, &voice)| mixed as i32 - voice as i32)
        .collect();

    // 20% 相对电平，跨过 4s 循环点直到 3.5s 开始淡出
    assert!((residual[0] - 2000).abs() <= 1);
    assert!((residual[84_000 - 1] - 2000).abs() <= 1);
    // 淡出过程中单调下降
    assert!(residual[100_000] < residual[90_000]);
    assert!(residual[140_000] < residual[100_000]);
    // 结尾接近静音
    assert!(residual[residual.len() - 1].abs() <= 1);
    assert_eq!(app.staged_entries(), 0);
}

#[tokio::test]
async fn test_corrupt_segment_is_rejected_without_residue() {
    let app = TestApp::new(None).await;
    let valid = encode_wav(&tone(0.5), RATE).unwrap();
    let payload = json!({
        "audioSegments": [
            STANDARD.encode(&valid),
            STANDARD.encode(&valid[..30]),
            STANDARD.encode(&valid),
        ]
    });

    let (status, headers, body) = app.mix(payload).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].is_string());
    assert!(error["details"].as_str().unwrap().starts_with("segment 1:"));
    assert_eq!(app.staged_entries(), 0);
}

#[tokio::test]
async fn test_invalid_base64_is_a_decode_error() {
    let app = TestApp::new(None).await;

    let (status, _, body) = app
        .mix(json!({ "audioSegments": ["@@@ not base64 @@@"] }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["details"].as_str().unwrap().starts_with("segment 0:"));
    assert_eq!(app.staged_entries(), 0);
}

#[tokio::test]
async fn test_empty_or_missing_segments_are_rejected() {
    let app = TestApp::new(None).await;

    for payload in [
        json!({ "audioSegments": [] }),
        json!({}),
        json!({ "audioSegments": "UklGRg==" }),
    ] {
        let (status, _, body) = app.mix(payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: Value = serde_json::from_slice(&body).unwrap();
        assert!(error["error"].is_string());
    }
    assert_eq!(app.staged_entries(), 0);
}

#[tokio::test]
async fn test_preflight_allows_any_origin() {
    let app = TestApp::new(None).await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/mix-audio")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let (status, headers, _) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap()
        .to_string();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
}

#[tokio::test]
async fn test_plain_options_request_succeeds() {
    let app = TestApp::new(None).await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/mix-audio")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_other_methods_are_not_allowed() {
    let app = TestApp::new(None).await;

    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(method)
            .uri("/api/mix-audio")
            .body(Body::empty())
            .unwrap();
        let (status, _, _) = app.send(request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}

#[tokio::test]
async fn test_identical_requests_yield_identical_output() {
    let background = encode_wav(&tone(1.3), RATE).unwrap();
    let app = TestApp::new(Some(background)).await;
    let (_, payload) = three_tones();

    let (_, _, first) = app.mix(payload.clone()).await;
    let (_, _, second) = app.mix(payload).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_concurrent_requests_are_isolated() {
    let app = TestApp::new(None).await;
    let short = json!({ "audioSegments": [STANDARD.encode(encode_wav(&tone(0.5), RATE).unwrap())] });
    let long = json!({ "audioSegments": [STANDARD.encode(encode_wav(&tone(1.0), RATE).unwrap())] });

    let (a, b) = tokio::join!(app.mix(short), app.mix(long));

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    assert_eq!(data_size(&a.2), 24_000);
    assert_eq!(data_size(&b.2), 48_000);
    assert_eq!(app.staged_entries(), 0);
}

#[tokio::test]
async fn test_ping() {
    let app = TestApp::new(None).await;

    let request = Request::builder()
        .uri("/api/ping")
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    let ping: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(ping["status"], "ok");
}

#[tokio::test]
async fn test_gemini_missing_fields() {
    let app = TestApp::new(None).await;

    let (status, _, body) = app
        .send(json_request("/api/gemini", json!({ "model": "gemini-2.5-flash" })))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(error["error"], "Missing model or requestBody in payload.");
}

#[tokio::test]
async fn test_gemini_all_keys_exhausted() {
    let app = TestApp::new(None).await;

    let (status, _, body) = app
        .send(json_request(
            "/api/gemini",
            json!({ "model": "gemini-2.5-flash", "requestBody": { "contents": [] } }),
        ))
        .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"]
        .as_str()
        .unwrap()
        .starts_with("All API keys failed. Last error:"));
}

#[tokio::test]
async fn test_gemini_model_with_url_syntax_is_rejected() {
    let app = TestApp::new(None).await;

    let (status, _, body) = app
        .send(json_request(
            "/api/gemini",
            json!({
                "model": "x:streamGenerateContent?alt=sse#",
                "requestBody": { "contents": [] }
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().starts_with("Invalid model name"));
}

#[tokio::test]
async fn test_missing_content_type_is_unsupported_media_type() {
    let app = TestApp::new(None).await;
    let (_, payload) = three_tones();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/mix-audio")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let (status, _, body) = app.send(request).await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].is_string());
    assert_eq!(app.staged_entries(), 0);
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = TestApp::with_body_limit(None, 1024).await;
    let (_, payload) = three_tones();

    let (status, _, body) = app.mix(payload).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].is_string());
    assert_eq!(app.staged_entries(), 0);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new(None).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/mix-audio")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"audioSegments\": ["))
        .unwrap();
    let (status, _, _) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
